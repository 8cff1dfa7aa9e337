use crate::domain::types::WeightPolicy;
use crate::engine::allocation::DEFAULT_WEIGHTS;
use serde::{Deserialize, Serialize};

/// 规划器配置（持久化为 JSON 文件）
///
/// 所有字段都有默认值，配置文件只需写出要覆盖的项。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// 预算分配参数
    pub allocation: AllocationSettings,

    /// ROI 评级阈值
    pub verdict: VerdictThresholds,

    /// 渠道概览展示行数（按输入顺序截取）
    pub overview_rows: usize,

    /// 界面语言（en / th / zh-CN）
    pub locale: String,

    /// 日志输出格式
    pub log_format: LogFormat,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            allocation: AllocationSettings::default(),
            verdict: VerdictThresholds::default(),
            overview_rows: 10,
            locale: "en".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

/// 预算分配参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationSettings {
    /// 排名权重（第 i 项对应第 i 名）
    pub weights: Vec<f64>,

    /// 候选不足时未使用权重的处理方式
    pub policy: WeightPolicy,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS.to_vec(),
            policy: WeightPolicy::Truncate,
        }
    }
}

/// ROI 评级阈值（百分比）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictThresholds {
    /// ROI >= 该值评为 Excellent
    pub excellent_roi_percent: f64,

    /// ROI >= 该值评为 Moderate，否则 Risky
    pub acceptable_roi_percent: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            excellent_roi_percent: 20.0,
            acceptable_roi_percent: 0.0,
        }
    }
}

/// 日志格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
