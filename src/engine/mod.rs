// ==========================================
// 联盟广告投放规划系统 - 引擎层
// ==========================================
// 职责: 清洗、费率聚合、投放预测、预算分配
// 红线: 纯函数，无 I/O，不缓存
// ==========================================

pub mod advisor;
pub mod aggregator;
pub mod allocation;
pub mod error;
pub mod projection;
pub mod sanitizer;

// 重导出核心引擎
pub use advisor::CampaignAdvisor;
pub use aggregator::RateAggregator;
pub use allocation::{AllocationPlanner, WeightTable, DEFAULT_WEIGHTS};
pub use error::{EngineError, EngineResult};
pub use projection::ProjectionCalculator;
pub use sanitizer::{DatasetSanitizer, SanitizeOutcome};
