// ==========================================
// 联盟广告投放规划系统 - 数据集导入器
// ==========================================
// 职责: 整合导入流程，从文件到原始记录
// 流程: 解析 → 表头校验 → 映射（含清洗）
// 红线: 表头缺列整体失败；单元格值异常整体失败（不跳行）
// ==========================================

use crate::domain::performance::RawPerformanceRecord;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FieldMapper, FileParser, RawTable};
use std::path::Path;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// 导入结果
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub headers: Vec<String>,
    pub records: Vec<RawPerformanceRecord>,
}

impl ImportOutcome {
    pub fn total_rows(&self) -> usize {
        self.records.len()
    }
}

// ==========================================
// DatasetImporter - 数据集导入器
// ==========================================
pub struct DatasetImporter {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
}

impl DatasetImporter {
    /// 创建导入器
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器
    pub fn new(file_parser: Box<dyn FileParser>, field_mapper: Box<dyn FieldMapper>) -> Self {
        Self {
            file_parser,
            field_mapper,
        }
    }

    /// 默认组件: 按扩展名选择解析器 + 标准字段映射
    pub fn with_defaults() -> Self {
        Self::new(Box::new(UniversalFileParser), Box::new(FieldMapperImpl::new()))
    }

    /// 从文件导入
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 所有数据行的原始记录（未过滤）
    /// - Err: 文件错误、SchemaError、TypeConversionError
    #[instrument(skip(self, file_path))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportOutcome> {
        let batch_id = Uuid::new_v4().to_string();
        let path = file_path.as_ref();
        info!(batch_id = %batch_id, file_path = %path.display(), "开始导入投放数据");

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let table = self.file_parser.parse_to_raw_table(path).map_err(|e| {
            error!(batch_id = %batch_id, error = %e, "文件解析失败");
            e
        })?;
        info!(batch_id = %batch_id, total_rows = table.rows.len(), "文件解析完成");

        let outcome = self.map_table(&table).map_err(|e| {
            error!(batch_id = %batch_id, error = %e, "数据映射失败");
            e
        })?;

        info!(batch_id = %batch_id, records = outcome.records.len(), "导入完成");
        Ok(outcome)
    }

    /// 校验并映射已解析的表格
    pub fn map_table(&self, table: &RawTable) -> ImportResult<ImportOutcome> {
        // === 步骤 2: 表头校验 ===
        debug!("步骤 2: 表头校验");
        self.field_mapper.validate_headers(&table.headers)?;

        // === 步骤 3: 字段映射 ===
        debug!("步骤 3: 字段映射");
        let records = table
            .rows
            .iter()
            .map(|row| self.field_mapper.map_to_raw_record(row))
            .collect::<ImportResult<Vec<_>>>()?;

        Ok(ImportOutcome {
            headers: table.headers.clone(),
            records,
        })
    }
}

impl Default for DatasetImporter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;
    use crate::importer::importer_trait::RawRow;
    use std::collections::HashMap;

    fn table(headers: &[&str], rows: Vec<Vec<(&str, &str)>>) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .into_iter()
                .enumerate()
                .map(|(idx, pairs)| RawRow {
                    line: idx + 2,
                    cells: pairs
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect::<HashMap<_, _>>(),
                })
                .collect(),
        }
    }

    const HEADERS: [&str; 7] = [
        "Sub_id4",
        "Ad Cost",
        "Order Count",
        "Total Com",
        "ROI (%)",
        "CPC(Link)",
        "Cost Per Order(Shopee)",
    ];

    #[test]
    fn test_map_table_header_only_is_ok() {
        let importer = DatasetImporter::with_defaults();
        let outcome = importer.map_table(&table(&HEADERS, vec![])).unwrap();
        assert_eq!(outcome.total_rows(), 0);
    }

    #[test]
    fn test_map_table_missing_columns() {
        let importer = DatasetImporter::with_defaults();
        let result = importer.map_table(&table(&["Sub_id4", "Ad Cost"], vec![]));
        match result {
            Err(ImportError::SchemaError { missing }) => assert_eq!(missing.len(), 5),
            other => panic!("expected SchemaError, got {:?}", other),
        }
    }

    #[test]
    fn test_map_table_value_error_aborts() {
        let importer = DatasetImporter::with_defaults();
        let rows = vec![
            vec![("Sub_id4", "a"), ("Ad Cost", "10"), ("Order Count", "1")],
            vec![("Sub_id4", "b"), ("Ad Cost", "ten"), ("Order Count", "1")],
        ];
        let result = importer.map_table(&table(&HEADERS, rows));
        assert!(matches!(
            result,
            Err(ImportError::TypeConversionError { row: 3, .. })
        ));
    }

    #[test]
    fn test_import_file_not_found() {
        let importer = DatasetImporter::with_defaults();
        let result = importer.import_file("missing_report.csv");
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}
