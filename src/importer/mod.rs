// ==========================================
// 联盟广告投放规划系统 - 导入层
// ==========================================
// 职责: 外部数据导入，生成原始投放记录
// 支持: CSV, Excel
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod dataset_importer;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use dataset_importer::{DatasetImporter, ImportOutcome};
pub use error::{ImportError, ImportResult};
pub use field_mapper::{columns, FieldMapper as FieldMapperImpl};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use importer_trait::{DataCleaner, FieldMapper, FileParser, RawRow, RawTable};
