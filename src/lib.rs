// ==========================================
// 联盟广告投放规划系统 - 核心库
// ==========================================
// 技术栈: Rust + CSV/Excel 导入 + CLI
// 系统定位: 决策支持工具（只给建议，不自动投放）
// 流水线: 清洗 -> 均值 -> 预测 -> 预算分配
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 计算规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 命令行集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ExclusionReason, RoiVerdict, WeightPolicy};

// 领域实体
pub use domain::{
    AdvisoryReport, AllocationEntry, AllocationPlan, CampaignTarget, PerformanceRecord,
    Projection, RateEstimates, RawPerformanceRecord,
};

// 引擎
pub use engine::{
    AllocationPlanner, CampaignAdvisor, DatasetSanitizer, ProjectionCalculator, RateAggregator,
    WeightTable,
};

// API
pub use api::{ApiError, ApiResult, ErrorKind, PlannerApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "联盟广告投放规划系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
