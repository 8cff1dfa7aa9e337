// ==========================================
// 联盟广告投放规划系统 - 费率聚合器
// ==========================================
// 职责: 清洗集 → 三项平均费率
// 口径: 逐行取值后做算术平均，缺失值不参与平均
// 红线: 本阶段不做任何舍入
// ==========================================

use crate::domain::advisory::RateEstimates;
use crate::domain::performance::PerformanceRecord;
use crate::engine::error::{EngineError, EngineResult};
use tracing::debug;

// ==========================================
// RateAggregator - 费率聚合器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct RateAggregator;

impl RateAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 计算平均费率
    ///
    /// - avg_cpc: CPC(Link) 平均值
    /// - avg_cost_per_order: Cost Per Order 平均值
    /// - avg_commission_rate: 逐行 total_commission / ad_cost 的平均值
    ///
    /// # 错误
    /// - 清洗集为空，或单均成本/佣金在所有行都缺失 → InsufficientData
    pub fn aggregate(&self, clean: &[PerformanceRecord]) -> EngineResult<RateEstimates> {
        if clean.is_empty() {
            return Err(EngineError::InsufficientData(
                "清洗集为空，无法计算平均费率".to_string(),
            ));
        }

        let avg_cpc = mean(clean.iter().filter_map(|r| r.cpc));

        let avg_cost_per_order = mean(clean.iter().filter_map(|r| r.cost_per_order))
            .ok_or_else(|| {
                EngineError::InsufficientData("Cost Per Order(Shopee) 列无有效值".to_string())
            })?;

        let avg_commission_rate = mean(clean.iter().filter_map(|r| r.commission_rate()))
            .ok_or_else(|| EngineError::InsufficientData("Total Com 列无有效值".to_string()))?;

        debug!(
            rows = clean.len(),
            avg_cpc = ?avg_cpc,
            avg_cost_per_order,
            avg_commission_rate,
            "平均费率计算完成"
        );

        Ok(RateEstimates {
            avg_cpc,
            avg_cost_per_order,
            avg_commission_rate,
        })
    }
}

/// 算术平均（跳过 NaN；无有效值时返回 None）
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .filter(|v| !v.is_nan())
        .fold((0.0_f64, 0_usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
