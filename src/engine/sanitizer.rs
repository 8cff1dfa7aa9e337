// ==========================================
// 联盟广告投放规划系统 - 数据清洗器
// ==========================================
// 职责: 按纳入规则过滤原始记录
// 规则: ad_cost > 0 且 order_count > 0，且两者均非缺失
// 输入: RawPerformanceRecord 列表
// 输出: 清洗集 + 剔除明细
// ==========================================

use crate::domain::advisory::ExcludedRow;
use crate::domain::performance::{PerformanceRecord, RawPerformanceRecord};
use crate::domain::types::ExclusionReason;
use crate::engine::error::{EngineError, EngineResult};
use tracing::debug;

/// 清洗结果
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizeOutcome {
    pub clean: Vec<PerformanceRecord>,
    pub exclusions: Vec<ExcludedRow>,
    pub total_rows: usize,
}

impl SanitizeOutcome {
    pub fn is_empty(&self) -> bool {
        self.clean.is_empty()
    }
}

// ==========================================
// DatasetSanitizer - 数据清洗器
// ==========================================
// 红线: 无状态，纯函数
#[derive(Debug, Default, Clone, Copy)]
pub struct DatasetSanitizer;

impl DatasetSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// 过滤原始记录（不判空）
    ///
    /// 其余字段（佣金、ROI、CPC、单均成本）不参与判定，原样透传
    pub fn filter(&self, raw: &[RawPerformanceRecord]) -> SanitizeOutcome {
        let mut clean = Vec::with_capacity(raw.len());
        let mut exclusions = Vec::new();

        for record in raw {
            match self.check_row(record) {
                Ok(accepted) => clean.push(accepted),
                Err(reason) => {
                    debug!(row_number = record.row_number, reason = %reason, "剔除记录");
                    exclusions.push(ExcludedRow {
                        row_number: record.row_number,
                        channel_id: record.channel_id.clone(),
                        reason,
                    });
                }
            }
        }

        SanitizeOutcome {
            clean,
            exclusions,
            total_rows: raw.len(),
        }
    }

    /// 过滤并判空
    ///
    /// # 返回
    /// - Ok(SanitizeOutcome): 至少一条可用记录
    /// - Err(InsufficientData): 清洗集为空，后续聚合不得执行
    pub fn sanitize(&self, raw: &[RawPerformanceRecord]) -> EngineResult<SanitizeOutcome> {
        let outcome = self.filter(raw);
        if outcome.is_empty() {
            return Err(EngineError::InsufficientData(format!(
                "{} 行记录中没有同时满足 Ad Cost > 0 与 Order Count > 0 的行",
                outcome.total_rows
            )));
        }
        Ok(outcome)
    }

    fn check_row(&self, record: &RawPerformanceRecord) -> Result<PerformanceRecord, ExclusionReason> {
        let ad_cost = match record.ad_cost {
            Some(c) if c.is_nan() => return Err(ExclusionReason::MissingAdCost),
            Some(c) => c,
            None => return Err(ExclusionReason::MissingAdCost),
        };
        let order_count = record
            .order_count
            .ok_or(ExclusionReason::MissingOrderCount)?;

        if order_count <= 0 {
            return Err(ExclusionReason::NonPositiveOrderCount);
        }
        if ad_cost <= 0.0 {
            return Err(ExclusionReason::NonPositiveAdCost);
        }

        Ok(PerformanceRecord {
            channel_id: record.channel_id.clone().unwrap_or_default(),
            ad_cost,
            order_count: order_count as u64,
            total_commission: record.total_commission,
            roi_percent: record.roi_percent,
            cpc: record.cpc,
            cost_per_order: record.cost_per_order,
            row_number: record.row_number,
        })
    }
}
