// ==========================================
// 联盟广告投放规划系统 - 历史投放记录
// ==========================================
// 职责: 定义导入中间结构与清洗后记录
// 红线: 只承载数据，不含计算逻辑
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RawPerformanceRecord - 原始记录（已类型转换，未过滤）
// ==========================================
// 所有字段可缺失：缺失值由清洗器判定去留
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPerformanceRecord {
    pub channel_id: Option<String>,      // Sub_id4
    pub ad_cost: Option<f64>,            // Ad Cost
    pub order_count: Option<i64>,        // Order Count
    pub total_commission: Option<f64>,   // Total Com
    pub roi_percent: Option<f64>,        // ROI (%)
    pub cpc: Option<f64>,                // CPC(Link)
    pub cost_per_order: Option<f64>,     // Cost Per Order(Shopee)

    // 元信息
    pub row_number: usize, // 来源行号（文件导入时为源文件行号，表头为第 1 行）
}

// ==========================================
// PerformanceRecord - 清洗后记录
// ==========================================
// 不变量: ad_cost > 0 且 order_count > 0
// 其余字段原样透传（可能缺失）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub channel_id: String,
    pub ad_cost: f64,
    pub order_count: u64,
    pub total_commission: Option<f64>,
    pub roi_percent: Option<f64>,
    pub cpc: Option<f64>,
    pub cost_per_order: Option<f64>,
    pub row_number: usize,
}

impl PerformanceRecord {
    /// 佣金率（total_commission / ad_cost）
    ///
    /// ad_cost 恒大于 0，佣金缺失时返回 None
    pub fn commission_rate(&self) -> Option<f64> {
        self.total_commission.map(|c| c / self.ad_cost)
    }
}
