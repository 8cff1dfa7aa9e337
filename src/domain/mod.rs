// ==========================================
// 联盟广告投放规划系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含文件读取逻辑，不含引擎逻辑
// ==========================================

pub mod advisory;
pub mod performance;
pub mod types;

// 重导出核心类型
pub use advisory::{
    AdvisoryReport, AllocationEntry, AllocationPlan, CampaignTarget, ChannelOverview,
    DatasetSummary, ExcludedRow, Projection, RateEstimates,
};
pub use performance::{PerformanceRecord, RawPerformanceRecord};
pub use types::{ExclusionReason, RoiVerdict, WeightPolicy};
