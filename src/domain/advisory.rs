// ==========================================
// 联盟广告投放规划系统 - 分析结果实体
// ==========================================
// 职责: 费率估计 / 投放预测 / 预算分配方案 / 分析报告
// 生命周期: 每次调用全量重算，不缓存、不落库
// ==========================================

use crate::domain::types::{ExclusionReason, RoiVerdict, WeightPolicy};
use serde::{Deserialize, Serialize};

// ==========================================
// CampaignTarget - 活动目标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CampaignTarget {
    pub target_orders: u64, // 目标订单数（>= 1）
    pub bonus_amount: f64,  // 保底奖金（>= 0）
}

impl CampaignTarget {
    pub fn new(target_orders: u64, bonus_amount: f64) -> Self {
        Self {
            target_orders,
            bonus_amount,
        }
    }
}

// ==========================================
// RateEstimates - 历史费率估计
// ==========================================
// 三项均为清洗集上逐行值的算术平均
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateEstimates {
    /// 平均点击成本（CPC 列全部缺失时为 None）
    pub avg_cpc: Option<f64>,
    pub avg_cost_per_order: f64,
    /// 逐行 total_commission / ad_cost 的平均值（不是总佣金 / 总花费）
    pub avg_commission_rate: f64,
}

// ==========================================
// Projection - 目标投放预测
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub target_orders: u64,
    pub bonus_amount: f64,
    pub estimated_ad_cost: f64,
    pub estimated_commission: f64,
    pub net_profit: f64,
    pub roi_percent: f64,
}

impl Projection {
    /// 预计总回报（佣金 + 奖金）
    pub fn expected_return(&self) -> f64 {
        self.estimated_commission + self.bonus_amount
    }
}

// ==========================================
// AllocationEntry / AllocationPlan - 预算分配方案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub rank: usize, // 从 1 开始
    pub channel_id: String,
    pub allocated_budget: f64,
    pub expected_orders: i64,
    pub historical_roi: f64,
    pub budget_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub policy: WeightPolicy,
    pub entries: Vec<AllocationEntry>,
}

impl AllocationPlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 份额合计（截断策略下可能小于 1）
    pub fn total_share(&self) -> f64 {
        self.entries.iter().map(|e| e.budget_share).sum()
    }

    pub fn total_budget(&self) -> f64 {
        self.entries.iter().map(|e| e.allocated_budget).sum()
    }

    pub fn total_expected_orders(&self) -> i64 {
        self.entries.iter().map(|e| e.expected_orders).sum()
    }
}

// ==========================================
// 数据集概况
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedRow {
    pub row_number: usize,
    pub channel_id: Option<String>,
    pub reason: ExclusionReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_rows: usize,
    pub clean_rows: usize,
    pub excluded_rows: usize,
    pub exclusions: Vec<ExcludedRow>,
}

/// 渠道表现概览（按输入顺序，用于 ROI 图表）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelOverview {
    pub channel_id: String,
    pub ad_cost: f64,
    pub order_count: u64,
    pub total_commission: Option<f64>,
    pub roi_percent: Option<f64>,
}

// ==========================================
// AdvisoryReport - 完整分析报告
// ==========================================
// 要么完整产出，要么不产出（无部分结果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryReport {
    pub dataset: DatasetSummary,
    pub rates: RateEstimates,
    pub projection: Projection,
    pub expected_return: f64,
    pub verdict: RoiVerdict,
    pub allocation: AllocationPlan,
    pub overview: Vec<ChannelOverview>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rank: usize, budget: f64, orders: i64, share: f64) -> AllocationEntry {
        AllocationEntry {
            rank,
            channel_id: format!("ch{}", rank),
            allocated_budget: budget,
            expected_orders: orders,
            historical_roi: 0.0,
            budget_share: share,
        }
    }

    #[test]
    fn test_plan_totals() {
        let plan = AllocationPlan {
            policy: WeightPolicy::Truncate,
            entries: vec![entry(1, 350.0, 10, 0.35), entry(2, 250.0, 5, 0.25)],
        };
        assert_eq!(plan.len(), 2);
        assert!((plan.total_share() - 0.60).abs() < 1e-9);
        assert!((plan.total_budget() - 600.0).abs() < 1e-9);
        assert_eq!(plan.total_expected_orders(), 15);
    }

    #[test]
    fn test_expected_return() {
        let projection = Projection {
            target_orders: 10,
            bonus_amount: 500.0,
            estimated_ad_cost: 1000.0,
            estimated_commission: 700.0,
            net_profit: 200.0,
            roi_percent: 20.0,
        };
        assert!((projection.expected_return() - 1200.0).abs() < 1e-9);
    }
}
