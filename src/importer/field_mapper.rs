// ==========================================
// 联盟广告投放规划系统 - 字段映射器实现
// ==========================================
// 职责: 表头校验 + 源字段 → 标准字段映射 + 类型转换
// ==========================================

use crate::domain::performance::RawPerformanceRecord;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{
    DataCleaner as DataCleanerTrait, FieldMapper as FieldMapperTrait, RawRow,
};

// ==========================================
// 标准列名
// ==========================================
pub mod columns {
    pub const CHANNEL_ID: &str = "Sub_id4";
    pub const AD_COST: &str = "Ad Cost";
    pub const ORDER_COUNT: &str = "Order Count";
    pub const TOTAL_COMMISSION: &str = "Total Com";
    pub const ROI_PERCENT: &str = "ROI (%)";
    pub const CPC: &str = "CPC(Link)";
    pub const COST_PER_ORDER: &str = "Cost Per Order(Shopee)";

    // 分平台佣金（可选，用于补全 Total Com）
    pub const SHOPEE_COMMISSION: &str = "Shopee Com";
    pub const LAZADA_COMMISSION: &str = "Lazada Com";

    /// 必需列
    pub const REQUIRED: [&str; 7] = [
        CHANNEL_ID,
        AD_COST,
        ORDER_COUNT,
        TOTAL_COMMISSION,
        ROI_PERCENT,
        CPC,
        COST_PER_ORDER,
    ];

    /// 分平台佣金列
    pub const PLATFORM_COMMISSIONS: [&str; 2] = [SHOPEE_COMMISSION, LAZADA_COMMISSION];
}

/// 列名别名（第一个为标准列名）
fn aliases(key: &str) -> &'static [&'static str] {
    match key {
        columns::CHANNEL_ID => &["Sub_id4", "Sub ID", "Sub_id"],
        columns::AD_COST => &["Ad Cost"],
        columns::ORDER_COUNT => &["Order Count"],
        columns::TOTAL_COMMISSION => &["Total Com", "Total Commission"],
        columns::ROI_PERCENT => &["ROI (%)", "ROI(%)", "ROI"],
        columns::CPC => &["CPC(Link)", "CPC (Link)", "CPC"],
        columns::COST_PER_ORDER => &[
            "Cost Per Order(Shopee)",
            "Cost Per Order (Shopee)",
            "Cost Per Order",
        ],
        columns::SHOPEE_COMMISSION => &["Shopee Com"],
        columns::LAZADA_COMMISSION => &["Lazada Com"],
        _ => &[],
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }
}

impl FieldMapperTrait for FieldMapper {
    fn validate_headers(&self, headers: &[String]) -> ImportResult<()> {
        let missing: Vec<String> = columns::REQUIRED
            .iter()
            .filter(|key| {
                !aliases(key)
                    .iter()
                    .any(|alias| headers.iter().any(|h| h == alias))
            })
            .map(|key| key.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::SchemaError { missing })
        }
    }

    fn map_to_raw_record(&self, row: &RawRow) -> ImportResult<RawPerformanceRecord> {
        let row_number = row.line;

        Ok(RawPerformanceRecord {
            channel_id: self.get_string(row, columns::CHANNEL_ID),
            ad_cost: self.parse_f64(row, columns::AD_COST, row_number)?,
            order_count: self.parse_count(row, columns::ORDER_COUNT, row_number)?,
            total_commission: self.parse_commission(row, row_number)?,
            roi_percent: self.parse_f64(row, columns::ROI_PERCENT, row_number)?,
            cpc: self.parse_f64(row, columns::CPC, row_number)?,
            cost_per_order: self.parse_f64(row, columns::COST_PER_ORDER, row_number)?,
            row_number,
        })
    }
}

impl FieldMapper {
    /// 提取字符串字段（返回 Option），支持多个可能的列名（别名）
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        aliases(key)
            .iter()
            .find_map(|alias| self.cleaner.normalize_null(row.cells.get(*alias).map(String::as_str)))
    }

    /// 解析浮点数（拒绝 inf / NaN 字面量）
    fn parse_f64(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => {
                let cleaned = self.cleaner.clean_numeric(&value);
                match cleaned.parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(Some(v)),
                    _ => Err(ImportError::TypeConversionError {
                        row: row_number,
                        field: key.to_string(),
                        message: format!("无法解析为数值: {}", value),
                    }),
                }
            }
        }
    }

    /// 解析订单数（整数，或小数部分为 0 的浮点数，如 "4.0"）
    fn parse_count(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<Option<i64>> {
        let value = match self.get_string(row, key) {
            None => return Ok(None),
            Some(v) => v,
        };
        let cleaned = self.cleaner.clean_numeric(&value);

        if let Ok(count) = cleaned.parse::<i64>() {
            return Ok(Some(count));
        }

        match cleaned.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                Ok(Some(v as i64))
            }
            _ => Err(ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为整数: {}", value),
            }),
        }
    }

    /// 解析总佣金
    ///
    /// Total Com 为空时，用分平台佣金之和补全；分平台佣金也都为空则为 None
    fn parse_commission(&self, row: &RawRow, row_number: usize) -> ImportResult<Option<f64>> {
        if let Some(total) = self.parse_f64(row, columns::TOTAL_COMMISSION, row_number)? {
            return Ok(Some(total));
        }

        let mut sum = None;
        for key in columns::PLATFORM_COMMISSIONS {
            if let Some(v) = self.parse_f64(row, key, row_number)? {
                sum = Some(sum.unwrap_or(0.0) + v);
            }
        }
        Ok(sum)
    }
}
