// ==========================================
// 联盟广告投放规划系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 任何错误都终止本次计算，不返回部分结果
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 数据不足 =====
    #[error("无可用数据: {0}")]
    InsufficientData(String),

    // ===== 除零 =====
    #[error("除数为零: {context}")]
    DivisionByZero { context: String },

    #[error("ROI 无法计算: 预计广告花费为 {estimated_ad_cost}")]
    UndefinedRoi { estimated_ad_cost: f64 },

    // ===== 数值错误 =====
    #[error("字段缺失 (行 {row}, 渠道 {channel_id}, 字段 {field})")]
    MissingValue {
        row: usize,
        channel_id: String,
        field: String,
    },

    #[error("计算结果非有限数值: {0}")]
    NonFiniteResult(String),

    // ===== 参数错误 =====
    #[error("无效的活动目标: {0}")]
    InvalidTarget(String),

    #[error("无效的权重表: {0}")]
    InvalidWeightTable(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
