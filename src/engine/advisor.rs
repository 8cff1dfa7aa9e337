// ==========================================
// 联盟广告投放规划系统 - 投放建议编排器
// ==========================================
// 职责: 串联 清洗 → 费率聚合 → 投放预测 → 预算分配
// 输入: 原始记录 + 活动目标
// 输出: AdvisoryReport（完整产出或报错，无部分结果）
// 红线: 无状态，同一输入两次运行结果完全一致
// ==========================================

use crate::config::planner_config::{PlannerConfig, VerdictThresholds};
use crate::domain::advisory::{
    AdvisoryReport, CampaignTarget, ChannelOverview, DatasetSummary,
};
use crate::domain::performance::{PerformanceRecord, RawPerformanceRecord};
use crate::domain::types::RoiVerdict;
use crate::engine::aggregator::RateAggregator;
use crate::engine::allocation::{AllocationPlanner, WeightTable};
use crate::engine::error::EngineResult;
use crate::engine::projection::ProjectionCalculator;
use crate::engine::sanitizer::DatasetSanitizer;
use tracing::{info, instrument};

// ==========================================
// CampaignAdvisor - 投放建议编排器
// ==========================================
#[derive(Debug, Clone)]
pub struct CampaignAdvisor {
    sanitizer: DatasetSanitizer,
    aggregator: RateAggregator,
    projector: ProjectionCalculator,
    planner: AllocationPlanner,
    verdict: VerdictThresholds,
    overview_rows: usize,
}

impl CampaignAdvisor {
    /// 按组件创建
    pub fn new(planner: AllocationPlanner, verdict: VerdictThresholds, overview_rows: usize) -> Self {
        Self {
            sanitizer: DatasetSanitizer::new(),
            aggregator: RateAggregator::new(),
            projector: ProjectionCalculator::new(),
            planner,
            verdict,
            overview_rows,
        }
    }

    /// 按配置创建（权重表在此校验）
    pub fn from_config(config: &PlannerConfig) -> EngineResult<Self> {
        let weights = WeightTable::new(config.allocation.weights.clone())?;
        Ok(Self::new(
            AllocationPlanner::new(weights, config.allocation.policy),
            config.verdict,
            config.overview_rows,
        ))
    }

    pub fn planner(&self) -> &AllocationPlanner {
        &self.planner
    }

    /// 生成投放建议
    ///
    /// # 错误
    /// - InvalidTarget: 目标订单 < 1 或奖金为负
    /// - InsufficientData: 清洗后无可用记录
    /// - UndefinedRoi / DivisionByZero / MissingValue: 计算路径上的非法分母
    #[instrument(skip(self, raw), fields(rows = raw.len(), target_orders = target.target_orders))]
    pub fn advise(
        &self,
        raw: &[RawPerformanceRecord],
        target: CampaignTarget,
    ) -> EngineResult<AdvisoryReport> {
        // 参数先于数据校验，避免无意义的清洗
        self.projector.validate_target(&target)?;

        // 1. 清洗
        let sanitized = self.sanitizer.sanitize(raw)?;
        info!(
            total_rows = sanitized.total_rows,
            clean_rows = sanitized.clean.len(),
            excluded_rows = sanitized.exclusions.len(),
            "数据清洗完成"
        );

        // 2. 费率聚合
        let rates = self.aggregator.aggregate(&sanitized.clean)?;

        // 3. 投放预测
        let projection = self.projector.project(&rates, &target)?;

        // 4. 预算分配
        let allocation = self.planner.plan(&sanitized.clean, &projection)?;

        let verdict = self.classify(projection.roi_percent);
        info!(
            estimated_ad_cost = projection.estimated_ad_cost,
            roi_percent = projection.roi_percent,
            verdict = %verdict,
            channels = allocation.len(),
            "投放建议生成完成"
        );

        let overview = self.overview(&sanitized.clean);
        let dataset = DatasetSummary {
            total_rows: sanitized.total_rows,
            clean_rows: sanitized.clean.len(),
            excluded_rows: sanitized.exclusions.len(),
            exclusions: sanitized.exclusions,
        };

        Ok(AdvisoryReport {
            dataset,
            rates,
            expected_return: projection.expected_return(),
            projection,
            verdict,
            allocation,
            overview,
        })
    }

    /// ROI 评级
    pub fn classify(&self, roi_percent: f64) -> RoiVerdict {
        if roi_percent >= self.verdict.excellent_roi_percent {
            RoiVerdict::Excellent
        } else if roi_percent >= self.verdict.acceptable_roi_percent {
            RoiVerdict::Moderate
        } else {
            RoiVerdict::Risky
        }
    }

    /// 渠道概览（按输入顺序取前 overview_rows 行）
    fn overview(&self, clean: &[PerformanceRecord]) -> Vec<ChannelOverview> {
        clean
            .iter()
            .take(self.overview_rows)
            .map(|r| ChannelOverview {
                channel_id: r.channel_id.clone(),
                ad_cost: r.ad_cost,
                order_count: r.order_count,
                total_commission: r.total_commission,
                roi_percent: r.roi_percent,
            })
            .collect()
    }
}

impl Default for CampaignAdvisor {
    fn default() -> Self {
        let config = PlannerConfig::default();
        Self::new(
            AllocationPlanner::default(),
            config.verdict,
            config.overview_rows,
        )
    }
}
