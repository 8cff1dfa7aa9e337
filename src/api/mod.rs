// ==========================================
// 联盟广告投放规划系统 - API 层
// ==========================================
// 职责: 业务接口封装，错误归类
// ==========================================

pub mod error;
pub mod planner_api;

pub use error::{ApiError, ApiResult, ErrorKind};
pub use planner_api::PlannerApi;
