// ==========================================
// 联盟广告投放规划系统 - 配置层
// ==========================================
// 职责: 规划器配置加载与校验
// 存储: JSON 配置文件（可选）
// ==========================================

pub mod config_manager;
pub mod error;
pub mod planner_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, ConfigSource};
pub use error::{ConfigError, ConfigResult};
pub use planner_config::{AllocationSettings, LogFormat, PlannerConfig, VerdictThresholds};
