// ==========================================
// 联盟广告投放规划系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值文本清洗
// ==========================================

use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;

/// 视为缺失值的文本（大小写不敏感）
const NULL_TOKENS: [&str; 7] = ["nan", "null", "none", "n/a", "na", "-", "#n/a"];

#[derive(Debug, Default, Clone, Copy)]
pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() || NULL_TOKENS.contains(&trimmed.to_lowercase().as_str()) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn clean_numeric(&self, value: &str) -> String {
        let stripped: String = value
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '฿' && !c.is_whitespace())
            .collect();
        stripped
            .strip_suffix('%')
            .map(str::to_string)
            .unwrap_or(stripped)
    }
}
