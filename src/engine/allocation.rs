// ==========================================
// 联盟广告投放规划系统 - 预算分配规划器
// ==========================================
// 职责: 按历史 ROI 选出前 N 个渠道，按固定权重分配预计花费
// 排序: ROI 降序；ROI 相同保持输入顺序（稳定排序）
// 权重: 由 WeightTable 注入，不足 N 个渠道时按 WeightPolicy 处理
// ==========================================

use crate::domain::advisory::{AllocationEntry, AllocationPlan, Projection};
use crate::domain::performance::PerformanceRecord;
use crate::domain::types::WeightPolicy;
use crate::engine::error::{EngineError, EngineResult};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// 默认权重（排名 1..5）
pub const DEFAULT_WEIGHTS: [f64; 5] = [0.35, 0.25, 0.20, 0.12, 0.08];

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

// ==========================================
// WeightTable - 排名权重表（不可变）
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    weights: Vec<f64>,
}

impl WeightTable {
    /// 创建权重表
    ///
    /// # 校验
    /// - 非空
    /// - 每项为有限值且 >= 0
    /// - 总和 > 0 且 <= 1
    pub fn new(weights: Vec<f64>) -> EngineResult<Self> {
        if weights.is_empty() {
            return Err(EngineError::InvalidWeightTable("权重表为空".to_string()));
        }
        if let Some((idx, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(EngineError::InvalidWeightTable(format!(
                "第 {} 项权重无效: {}",
                idx + 1,
                w
            )));
        }

        let sum: f64 = weights.iter().sum();
        if sum <= 0.0 {
            return Err(EngineError::InvalidWeightTable("权重总和为 0".to_string()));
        }
        if sum > 1.0 + WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::InvalidWeightTable(format!(
                "权重总和超过 1: {}",
                sum
            )));
        }

        Ok(Self { weights })
    }

    /// 最多可分配的渠道数
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// 取前 count 项权重并按策略处理
    ///
    /// - Truncate: 原样返回前缀，未使用份额丢弃
    /// - Renormalize: 前缀按其总和缩放至合计为 1
    pub fn effective_weights(&self, count: usize, policy: WeightPolicy) -> EngineResult<Vec<f64>> {
        let prefix = &self.weights[..count.min(self.weights.len())];
        match policy {
            WeightPolicy::Truncate => Ok(prefix.to_vec()),
            WeightPolicy::Renormalize => {
                if prefix.is_empty() {
                    return Ok(Vec::new());
                }
                let sum: f64 = prefix.iter().sum();
                if sum <= 0.0 {
                    return Err(EngineError::InvalidWeightTable(format!(
                        "前 {} 项权重之和为 0，无法归一化",
                        prefix.len()
                    )));
                }
                Ok(prefix.iter().map(|w| w / sum).collect())
            }
        }
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS.to_vec(),
        }
    }
}

// ==========================================
// AllocationPlanner - 预算分配规划器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct AllocationPlanner {
    weights: WeightTable,
    policy: WeightPolicy,
}

impl AllocationPlanner {
    pub fn new(weights: WeightTable, policy: WeightPolicy) -> Self {
        Self { weights, policy }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn policy(&self) -> WeightPolicy {
        self.policy
    }

    /// 按 ROI 排名候选渠道
    ///
    /// ROI 缺失（或 NaN）的记录无法排序，不参与排名。
    /// sort_by 为稳定排序，ROI 相同的记录保持输入顺序。
    pub fn rank_candidates<'a>(&self, clean: &'a [PerformanceRecord]) -> Vec<(&'a PerformanceRecord, f64)> {
        let mut ranked: Vec<(&PerformanceRecord, f64)> = clean
            .iter()
            .filter_map(|r| r.roi_percent.filter(|roi| !roi.is_nan()).map(|roi| (r, roi)))
            .collect();

        if ranked.len() < clean.len() {
            debug!(
                skipped = clean.len() - ranked.len(),
                "ROI 缺失的记录不参与排名"
            );
        }

        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.truncate(self.weights.len());
        ranked
    }

    /// 生成预算分配方案
    ///
    /// - allocated_budget = estimated_ad_cost × weight[rank]
    /// - expected_orders = floor(allocated_budget / cost_per_order)
    ///
    /// # 错误
    /// - 入选记录 cost_per_order == 0 → DivisionByZero
    /// - 入选记录 cost_per_order 缺失 → MissingValue
    pub fn plan(
        &self,
        clean: &[PerformanceRecord],
        projection: &Projection,
    ) -> EngineResult<AllocationPlan> {
        let selected = self.rank_candidates(clean);
        if selected.is_empty() {
            warn!("没有带 ROI 的记录，分配方案为空");
        }

        let weights = self.weights.effective_weights(selected.len(), self.policy)?;

        let mut entries = Vec::with_capacity(selected.len());
        for (idx, ((record, roi), weight)) in selected.into_iter().zip(weights).enumerate() {
            let allocated_budget = projection.estimated_ad_cost * weight;
            let expected_orders = self.expected_orders(record, allocated_budget)?;

            entries.push(AllocationEntry {
                rank: idx + 1,
                channel_id: record.channel_id.clone(),
                allocated_budget,
                expected_orders,
                historical_roi: roi,
                budget_share: weight,
            });
        }

        debug!(
            entries = entries.len(),
            policy = %self.policy,
            "预算分配完成"
        );

        Ok(AllocationPlan {
            policy: self.policy,
            entries,
        })
    }

    fn expected_orders(&self, record: &PerformanceRecord, allocated_budget: f64) -> EngineResult<i64> {
        let cost_per_order = record
            .cost_per_order
            .filter(|v| !v.is_nan())
            .ok_or_else(|| EngineError::MissingValue {
                row: record.row_number,
                channel_id: record.channel_id.clone(),
                field: "Cost Per Order(Shopee)".to_string(),
            })?;

        if cost_per_order == 0.0 {
            return Err(EngineError::DivisionByZero {
                context: format!(
                    "渠道 {} (行 {}) 的 cost_per_order 为 0，无法估算订单数",
                    record.channel_id, record.row_number
                ),
            });
        }

        let orders = (allocated_budget / cost_per_order).floor();
        if !orders.is_finite() {
            return Err(EngineError::NonFiniteResult(format!(
                "渠道 {} 的预计订单数 = {}",
                record.channel_id, orders
            )));
        }
        Ok(orders as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, roi: Option<f64>, cpo: Option<f64>) -> PerformanceRecord {
        PerformanceRecord {
            channel_id: id.to_string(),
            ad_cost: 100.0,
            order_count: 5,
            total_commission: Some(80.0),
            roi_percent: roi,
            cpc: Some(1.5),
            cost_per_order: cpo,
            row_number: 1,
        }
    }

    fn projection(cost: f64) -> Projection {
        Projection {
            target_orders: 100,
            bonus_amount: 0.0,
            estimated_ad_cost: cost,
            estimated_commission: 0.0,
            net_profit: -cost,
            roi_percent: -100.0,
        }
    }

    #[test]
    fn test_weight_table_validation() {
        assert!(WeightTable::new(vec![]).is_err());
        assert!(WeightTable::new(vec![0.5, -0.1]).is_err());
        assert!(WeightTable::new(vec![0.7, 0.4]).is_err());
        assert!(WeightTable::new(vec![0.0, 0.0]).is_err());
        assert!(WeightTable::new(vec![f64::NAN]).is_err());
        assert!(WeightTable::new(vec![0.6, 0.4]).is_ok());
        assert_eq!(WeightTable::default().weights(), &DEFAULT_WEIGHTS);
    }

    #[test]
    fn test_effective_weights_policies() {
        let table = WeightTable::default();

        let truncated = table.effective_weights(3, WeightPolicy::Truncate).unwrap();
        assert_eq!(truncated, vec![0.35, 0.25, 0.20]);

        let renormalized = table.effective_weights(3, WeightPolicy::Renormalize).unwrap();
        let sum: f64 = renormalized.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((renormalized[0] - 0.4375).abs() < 1e-12);

        // 超过权重表长度按表长截断
        assert_eq!(table.effective_weights(9, WeightPolicy::Truncate).unwrap().len(), 5);
        assert!(table.effective_weights(0, WeightPolicy::Renormalize).unwrap().is_empty());
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let clean = vec![
            record("a", Some(10.0), Some(10.0)),
            record("b", Some(30.0), Some(10.0)),
            record("c", Some(10.0), Some(10.0)),
            record("d", None, Some(10.0)),
            record("e", Some(30.0), Some(10.0)),
        ];
        let planner = AllocationPlanner::default();
        let ranked: Vec<&str> = planner
            .rank_candidates(&clean)
            .iter()
            .map(|(r, _)| r.channel_id.as_str())
            .collect();
        assert_eq!(ranked, vec!["b", "e", "a", "c"]);
    }

    #[test]
    fn test_plan_top_five_of_seven() {
        let clean: Vec<PerformanceRecord> = (0..7)
            .map(|i| record(&format!("s{}", i), Some(i as f64 * 10.0), Some(25.0)))
            .collect();
        let plan = AllocationPlanner::default().plan(&clean, &projection(2000.0)).unwrap();

        assert_eq!(plan.len(), 5);
        let ids: Vec<&str> = plan.entries.iter().map(|e| e.channel_id.as_str()).collect();
        assert_eq!(ids, vec!["s6", "s5", "s4", "s3", "s2"]);
        assert!((plan.total_share() - 1.0).abs() < 1e-9);

        let first = &plan.entries[0];
        assert_eq!(first.rank, 1);
        assert!((first.allocated_budget - 700.0).abs() < 1e-9);
        assert_eq!(first.expected_orders, 28);
        assert_eq!(first.historical_roi, 60.0);
    }

    #[test]
    fn test_plan_three_records_truncates_weights() {
        let clean = vec![
            record("x", Some(5.0), Some(10.0)),
            record("y", Some(15.0), Some(10.0)),
            record("z", Some(-5.0), Some(10.0)),
        ];
        let plan = AllocationPlanner::default().plan(&clean, &projection(1000.0)).unwrap();
        assert_eq!(plan.len(), 3);
        assert!((plan.total_share() - 0.80).abs() < 1e-9);
        assert!((plan.total_budget() - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_plan_three_records_renormalized() {
        let clean = vec![
            record("x", Some(5.0), Some(10.0)),
            record("y", Some(15.0), Some(10.0)),
            record("z", Some(-5.0), Some(10.0)),
        ];
        let planner = AllocationPlanner::new(WeightTable::default(), WeightPolicy::Renormalize);
        let plan = planner.plan(&clean, &projection(1000.0)).unwrap();
        assert!((plan.total_share() - 1.0).abs() < 1e-9);
        assert!((plan.total_budget() - 1000.0).abs() < 1e-9);
        assert_eq!(plan.policy, WeightPolicy::Renormalize);
    }

    #[test]
    fn test_expected_orders_floor() {
        // 350 / 30 = 11.67 → 11
        let clean = vec![record("only", Some(1.0), Some(30.0))];
        let plan = AllocationPlanner::default().plan(&clean, &projection(1000.0)).unwrap();
        assert_eq!(plan.entries[0].expected_orders, 11);
        assert_eq!(plan.entries[0].budget_share, 0.35);
    }

    #[test]
    fn test_zero_cost_per_order_is_division_by_zero() {
        let clean = vec![
            record("top", Some(90.0), Some(0.0)),
            record("next", Some(10.0), Some(12.0)),
        ];
        let result = AllocationPlanner::default().plan(&clean, &projection(1000.0));
        assert!(matches!(result, Err(EngineError::DivisionByZero { .. })));
    }

    #[test]
    fn test_missing_cost_per_order_is_missing_value() {
        let clean = vec![record("top", Some(90.0), None)];
        let result = AllocationPlanner::default().plan(&clean, &projection(1000.0));
        assert!(matches!(result, Err(EngineError::MissingValue { .. })));
    }

    #[test]
    fn test_custom_weight_table() {
        let table = WeightTable::new(vec![0.5, 0.5]).unwrap();
        let planner = AllocationPlanner::new(table, WeightPolicy::Truncate);
        let clean = vec![
            record("a", Some(1.0), Some(10.0)),
            record("b", Some(2.0), Some(10.0)),
            record("c", Some(3.0), Some(10.0)),
        ];
        let plan = planner.plan(&clean, &projection(100.0)).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.entries[0].channel_id, "c");
        assert_eq!(plan.entries[1].channel_id, "b");
        assert_eq!(plan.entries[1].expected_orders, 5);
    }

    #[test]
    fn test_no_roi_gives_empty_plan() {
        let clean = vec![record("a", None, Some(10.0))];
        let plan = AllocationPlanner::default().plan(&clean, &projection(100.0)).unwrap();
        assert!(plan.is_empty());
    }
}
