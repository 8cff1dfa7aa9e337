// ==========================================
// 联盟广告投放规划系统 - 投放预测计算器
// ==========================================
// 职责: 平均费率 + 活动目标 → 花费 / 佣金 / 净利润 / ROI
// 红线: 预计花费为 0 时 ROI 无定义，必须报错而不是输出 inf/NaN
// ==========================================

use crate::domain::advisory::{CampaignTarget, Projection, RateEstimates};
use crate::engine::error::{EngineError, EngineResult};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectionCalculator;

impl ProjectionCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 校验活动目标
    ///
    /// - target_orders >= 1
    /// - bonus_amount 为有限值且 >= 0
    pub fn validate_target(&self, target: &CampaignTarget) -> EngineResult<()> {
        if target.target_orders == 0 {
            return Err(EngineError::InvalidTarget(
                "target_orders 必须 >= 1".to_string(),
            ));
        }
        if !target.bonus_amount.is_finite() || target.bonus_amount < 0.0 {
            return Err(EngineError::InvalidTarget(format!(
                "bonus_amount 必须为非负数: {}",
                target.bonus_amount
            )));
        }
        Ok(())
    }

    /// 计算投放预测
    ///
    /// - estimated_ad_cost = target_orders × avg_cost_per_order
    /// - estimated_commission = estimated_ad_cost × avg_commission_rate
    /// - net_profit = estimated_commission + bonus_amount − estimated_ad_cost
    /// - roi_percent = net_profit / estimated_ad_cost × 100
    pub fn project(
        &self,
        rates: &RateEstimates,
        target: &CampaignTarget,
    ) -> EngineResult<Projection> {
        self.validate_target(target)?;

        let estimated_ad_cost = target.target_orders as f64 * rates.avg_cost_per_order;
        if estimated_ad_cost == 0.0 {
            return Err(EngineError::UndefinedRoi { estimated_ad_cost });
        }

        let estimated_commission = estimated_ad_cost * rates.avg_commission_rate;
        let net_profit = estimated_commission + target.bonus_amount - estimated_ad_cost;
        let roi_percent = (net_profit / estimated_ad_cost) * 100.0;

        for (name, value) in [
            ("estimated_ad_cost", estimated_ad_cost),
            ("estimated_commission", estimated_commission),
            ("net_profit", net_profit),
            ("roi_percent", roi_percent),
        ] {
            if !value.is_finite() {
                return Err(EngineError::NonFiniteResult(format!("{} = {}", name, value)));
            }
        }

        debug!(
            estimated_ad_cost,
            estimated_commission, net_profit, roi_percent, "投放预测完成"
        );

        Ok(Projection {
            target_orders: target.target_orders,
            bonus_amount: target.bonus_amount,
            estimated_ad_cost,
            estimated_commission,
            net_profit,
            roi_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(cpo: f64, commission_rate: f64) -> RateEstimates {
        RateEstimates {
            avg_cpc: None,
            avg_cost_per_order: cpo,
            avg_commission_rate: commission_rate,
        }
    }

    #[test]
    fn test_project_loss_scenario() {
        let projection = ProjectionCalculator::new()
            .project(&rates(20.0, 0.6), &CampaignTarget::new(100, 0.0))
            .unwrap();

        assert!((projection.estimated_ad_cost - 2000.0).abs() < 1e-9);
        assert!((projection.estimated_commission - 1200.0).abs() < 1e-9);
        assert!((projection.net_profit + 800.0).abs() < 1e-9);
        assert!((projection.roi_percent + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_bonus_lifts_profit() {
        let projection = ProjectionCalculator::new()
            .project(&rates(20.0, 0.6), &CampaignTarget::new(100, 5000.0))
            .unwrap();

        assert!((projection.net_profit - 4200.0).abs() < 1e-9);
        assert!((projection.roi_percent - 210.0).abs() < 1e-9);
        assert!((projection.expected_return() - 6200.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cost_per_order_is_undefined_roi() {
        let result = ProjectionCalculator::new().project(&rates(0.0, 0.6), &CampaignTarget::new(10, 0.0));
        assert!(matches!(result, Err(EngineError::UndefinedRoi { .. })));
    }

    #[test]
    fn test_invalid_targets() {
        let calc = ProjectionCalculator::new();
        assert!(matches!(
            calc.project(&rates(20.0, 0.6), &CampaignTarget::new(0, 0.0)),
            Err(EngineError::InvalidTarget(_))
        ));
        assert!(matches!(
            calc.project(&rates(20.0, 0.6), &CampaignTarget::new(1, -1.0)),
            Err(EngineError::InvalidTarget(_))
        ));
        assert!(matches!(
            calc.project(&rates(20.0, 0.6), &CampaignTarget::new(1, f64::NAN)),
            Err(EngineError::InvalidTarget(_))
        ));
    }
}
