// ==========================================
// 联盟广告投放规划系统 - 领域类型定义
// ==========================================
// 职责: 枚举类型（权重策略 / ROI 评级 / 剔除原因）
// 序列化格式: snake_case（与配置文件、JSON 输出一致）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 权重策略 (Weight Policy)
// ==========================================
// 候选渠道不足权重表长度时，未使用的权重如何处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightPolicy {
    /// 截断: 只使用前缀权重，剩余份额直接舍弃（不重新归一化）
    #[default]
    Truncate,
    /// 归一化: 前缀权重按其总和重新缩放，使份额合计为 1
    Renormalize,
}

impl fmt::Display for WeightPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightPolicy::Truncate => write!(f, "truncate"),
            WeightPolicy::Renormalize => write!(f, "renormalize"),
        }
    }
}

impl std::str::FromStr for WeightPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "truncate" => Ok(WeightPolicy::Truncate),
            "renormalize" => Ok(WeightPolicy::Renormalize),
            other => Err(format!("未知的权重策略: {}", other)),
        }
    }
}

// ==========================================
// ROI 评级 (ROI Verdict)
// ==========================================
// 红线: 等级制，阈值来自配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiVerdict {
    Excellent, // 可直接执行
    Moderate,  // 为正但偏低
    Risky,     // 预计亏损
}

impl RoiVerdict {
    /// i18n 键
    pub fn message_key(&self) -> &'static str {
        match self {
            RoiVerdict::Excellent => "verdict.excellent",
            RoiVerdict::Moderate => "verdict.moderate",
            RoiVerdict::Risky => "verdict.risky",
        }
    }
}

impl fmt::Display for RoiVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoiVerdict::Excellent => write!(f, "EXCELLENT"),
            RoiVerdict::Moderate => write!(f, "MODERATE"),
            RoiVerdict::Risky => write!(f, "RISKY"),
        }
    }
}

// ==========================================
// 剔除原因 (Exclusion Reason)
// ==========================================
// 清洗阶段被排除的行必须给出原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExclusionReason {
    MissingAdCost,
    MissingOrderCount,
    NonPositiveAdCost,
    NonPositiveOrderCount,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::MissingAdCost => write!(f, "MISSING_AD_COST"),
            ExclusionReason::MissingOrderCount => write!(f, "MISSING_ORDER_COUNT"),
            ExclusionReason::NonPositiveAdCost => write!(f, "NON_POSITIVE_AD_COST"),
            ExclusionReason::NonPositiveOrderCount => write!(f, "NON_POSITIVE_ORDER_COUNT"),
        }
    }
}
