// ==========================================
// 联盟广告投放规划系统 - 导入组件 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 表头校验 → 字段映射（含单元格清洗）
// ==========================================

use crate::domain::performance::RawPerformanceRecord;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 原始数据行
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    /// 源文件行号（表头为第 1 行）
    pub line: usize,
    /// 列名 → 单元格文本（已 TRIM）
    pub cells: HashMap<String, String>,
}

/// 原始表格（表头 + 数据行）
///
/// 表头单独保留：只有表头没有数据的文件也要能做结构校验
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 非空白数据行
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 表头校验 + 字段映射接口（阶段 1）
// 实现者: field_mapper::FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 校验必需列是否齐全
    ///
    /// # 返回
    /// - Err(SchemaError): 列出所有缺失列（不是只报第一个）
    fn validate_headers(&self, headers: &[String]) -> ImportResult<()>;

    /// 将原始行映射为 RawPerformanceRecord
    ///
    /// # 返回
    /// - Err(TypeConversionError): 数值列中存在无法解析的值
    fn map_to_raw_record(&self, row: &RawRow) -> ImportResult<RawPerformanceRecord>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 单元格清洗接口
// 实现者: data_cleaner::DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 标准化 NULL 值（空白 / nan / null / N/A 等 → None）
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// 清洗数值文本（去千分位、货币符号、百分号）
    fn clean_numeric(&self, value: &str) -> String;
}
