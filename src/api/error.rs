// ==========================================
// 联盟广告投放规划系统 - API层错误类型
// ==========================================
// 职责: 汇总导入/引擎/配置错误，提供可匹配的错误类别与本地化提示
// 红线: 调用方按 ErrorKind 分支，不解析错误文本
// ==========================================

use crate::config::error::ConfigError;
use crate::engine::error::EngineError;
use crate::i18n::{t, t_with_args};
use crate::importer::error::ImportError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Schema,
    InsufficientData,
    /// 含预计花费为 0 导致的 ROI 无定义
    DivisionByZero,
    Value,
    File,
    Config,
}

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入数据错误
    // ==========================================
    #[error("缺少必需列: {}", .missing.join(", "))]
    SchemaError { missing: Vec<String> },

    #[error("无可用数据: {0}")]
    InsufficientData(String),

    #[error("数据值错误: {0}")]
    ValueError(String),

    // ==========================================
    // 计算错误
    // ==========================================
    #[error("除数为零: {0}")]
    DivisionByZero(String),

    #[error("ROI 无法计算: 预计广告花费为 {estimated_ad_cost}")]
    UndefinedRoi { estimated_ad_cost: f64 },

    // ==========================================
    // 环境错误
    // ==========================================
    #[error("文件错误: {0}")]
    FileError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// 错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::SchemaError { .. } => ErrorKind::Schema,
            ApiError::InsufficientData(_) => ErrorKind::InsufficientData,
            ApiError::ValueError(_) => ErrorKind::Value,
            ApiError::DivisionByZero(_) => ErrorKind::DivisionByZero,
            ApiError::UndefinedRoi { .. } => ErrorKind::DivisionByZero,
            ApiError::FileError(_) => ErrorKind::File,
            ApiError::ConfigError(_) => ErrorKind::Config,
        }
    }

    /// 本地化的用户提示（按当前 locale）
    pub fn user_message(&self) -> String {
        match self {
            ApiError::SchemaError { missing } => {
                format!(
                    "{}\n{}",
                    t_with_args("error.schema", &[("columns", missing.join(", ").as_str())]),
                    t("error.hint_columns")
                )
            }
            ApiError::InsufficientData(_) => t("error.insufficient_data"),
            ApiError::DivisionByZero(_) => t("error.division_by_zero"),
            ApiError::UndefinedRoi { .. } => t("error.undefined_roi"),
            ApiError::ValueError(detail) => t_with_args("error.value", &[("detail", detail.as_str())]),
            ApiError::FileError(detail) => t_with_args("error.file", &[("detail", detail.as_str())]),
            ApiError::ConfigError(detail) => t_with_args("error.config", &[("detail", detail.as_str())]),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::SchemaError { missing } => ApiError::SchemaError { missing },
            ImportError::TypeConversionError { .. } => ApiError::ValueError(err.to_string()),
            ImportError::FileNotFound(_)
            | ImportError::UnsupportedFormat(_)
            | ImportError::FileReadError(_)
            | ImportError::ExcelParseError(_)
            | ImportError::CsvParseError(_) => ApiError::FileError(err.to_string()),
        }
    }
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InsufficientData(msg) => ApiError::InsufficientData(msg),
            EngineError::DivisionByZero { context } => ApiError::DivisionByZero(context),
            EngineError::UndefinedRoi { estimated_ad_cost } => {
                ApiError::UndefinedRoi { estimated_ad_cost }
            }
            EngineError::MissingValue { .. }
            | EngineError::NonFiniteResult(_)
            | EngineError::InvalidTarget(_) => ApiError::ValueError(err.to_string()),
            EngineError::InvalidWeightTable(_) => ApiError::ConfigError(err.to_string()),
        }
    }
}

// ==========================================
// 从 ConfigError 转换
// ==========================================
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{set_locale, tests::LOCALE_TEST_LOCK};

    #[test]
    fn test_import_error_mapping() {
        let err: ApiError = ImportError::SchemaError {
            missing: vec!["Ad Cost".to_string()],
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Schema);

        let err: ApiError = ImportError::TypeConversionError {
            row: 3,
            field: "Ad Cost".to_string(),
            message: "x".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Value);

        let err: ApiError = ImportError::FileNotFound("a.csv".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::File);
    }

    #[test]
    fn test_engine_error_mapping() {
        let cases = vec![
            (EngineError::InsufficientData("x".into()), ErrorKind::InsufficientData),
            (
                EngineError::DivisionByZero { context: "x".into() },
                ErrorKind::DivisionByZero,
            ),
            (
                EngineError::UndefinedRoi { estimated_ad_cost: 0.0 },
                ErrorKind::DivisionByZero,
            ),
            (EngineError::InvalidTarget("x".into()), ErrorKind::Value),
            (EngineError::InvalidWeightTable("x".into()), ErrorKind::Config),
        ];
        for (engine_err, kind) in cases {
            assert_eq!(ApiError::from(engine_err).kind(), kind);
        }
    }

    #[test]
    fn test_undefined_roi_display() {
        let err = ApiError::from(EngineError::UndefinedRoi { estimated_ad_cost: 0.0 });
        assert_eq!(err.to_string(), "ROI 无法计算: 预计广告花费为 0");
        assert_eq!(err.to_string().matches("ROI 无法计算").count(), 1);
    }

    #[test]
    fn test_user_message_localized() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        let err = ApiError::SchemaError {
            missing: vec!["CPC(Link)".to_string(), "Total Com".to_string()],
        };

        set_locale("en");
        let msg = err.user_message();
        assert!(msg.contains("CPC(Link), Total Com"));
        assert!(msg.contains("Missing required columns"));

        set_locale("th");
        assert!(ApiError::InsufficientData("x".into())
            .user_message()
            .contains("ไม่มีข้อมูลที่ใช้ได้"));

        set_locale("en");
    }
}
