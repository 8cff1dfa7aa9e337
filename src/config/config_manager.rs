// ==========================================
// 联盟广告投放规划系统 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、快照
// 存储: JSON 文件（不持久化任何历史数据）
// 加载顺序: 显式路径 → 用户配置目录 → 内置默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::planner_config::PlannerConfig;
use crate::engine::allocation::WeightTable;
use crate::i18n::SUPPORTED_LOCALES;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 用户配置目录下的子目录名
pub const CONFIG_DIR_NAME: &str = "affiliate-ad-planner";

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// 配置键（用于错误定位）
// ==========================================
pub mod config_keys {
    pub const ALLOCATION_WEIGHTS: &str = "allocation.weights";
    pub const VERDICT_EXCELLENT: &str = "verdict.excellent_roi_percent";
    pub const VERDICT_ACCEPTABLE: &str = "verdict.acceptable_roi_percent";
    pub const OVERVIEW_ROWS: &str = "overview_rows";
    pub const LOCALE: &str = "locale";
}

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// 命令行/调用方显式指定
    Explicit(PathBuf),
    /// 用户配置目录
    UserDir(PathBuf),
    /// 内置默认值
    Defaults,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PlannerConfig,
    source: ConfigSource,
}

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - path: 显式配置文件路径（必须存在）
    ///
    /// # 返回
    /// - Ok(ConfigManager): 校验通过的配置
    /// - Err: 文件不存在（仅显式路径）、格式错误、取值无效
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        if let Some(explicit) = path {
            if !explicit.exists() {
                return Err(ConfigError::FileNotFound(explicit.display().to_string()));
            }
            let config = Self::read_file(explicit)?;
            info!(path = %explicit.display(), "已加载配置文件");
            return Self::with_source(config, ConfigSource::Explicit(explicit.to_path_buf()));
        }

        if let Some(default_path) = Self::default_config_path() {
            if default_path.exists() {
                let config = Self::read_file(&default_path)?;
                info!(path = %default_path.display(), "已加载用户配置");
                return Self::with_source(config, ConfigSource::UserDir(default_path));
            }
        }

        debug!("未找到配置文件，使用内置默认值");
        Self::with_source(PlannerConfig::default(), ConfigSource::Defaults)
    }

    /// 从已有配置对象创建（会执行校验）
    pub fn from_config(config: PlannerConfig) -> ConfigResult<Self> {
        Self::with_source(config, ConfigSource::Defaults)
    }

    /// 用户配置目录下的默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// 覆盖界面语言（命令行参数优先于配置文件）
    pub fn override_locale(&mut self, locale: &str) -> ConfigResult<()> {
        Self::validate_locale(locale)?;
        self.config.locale = locale.to_string();
        Ok(())
    }

    /// 当前生效配置的快照（JSON 格式）
    pub fn snapshot_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.config)?)
    }

    /// 校验配置
    pub fn validate(config: &PlannerConfig) -> ConfigResult<()> {
        WeightTable::new(config.allocation.weights.clone()).map_err(|e| {
            ConfigError::InvalidValue {
                key: config_keys::ALLOCATION_WEIGHTS.to_string(),
                message: e.to_string(),
            }
        })?;

        let verdict = &config.verdict;
        if !verdict.excellent_roi_percent.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: config_keys::VERDICT_EXCELLENT.to_string(),
                message: "必须为有限数值".to_string(),
            });
        }
        if !verdict.acceptable_roi_percent.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: config_keys::VERDICT_ACCEPTABLE.to_string(),
                message: "必须为有限数值".to_string(),
            });
        }
        if verdict.acceptable_roi_percent > verdict.excellent_roi_percent {
            return Err(ConfigError::InvalidValue {
                key: config_keys::VERDICT_ACCEPTABLE.to_string(),
                message: format!(
                    "不能高于 {} ({} > {})",
                    config_keys::VERDICT_EXCELLENT,
                    verdict.acceptable_roi_percent,
                    verdict.excellent_roi_percent
                ),
            });
        }

        if config.overview_rows == 0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::OVERVIEW_ROWS.to_string(),
                message: "必须 >= 1".to_string(),
            });
        }

        Self::validate_locale(&config.locale)
    }

    fn validate_locale(locale: &str) -> ConfigResult<()> {
        if SUPPORTED_LOCALES.contains(&locale) {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                key: config_keys::LOCALE.to_string(),
                message: format!("不支持的语言: {}（可选: {}）", locale, SUPPORTED_LOCALES.join(", ")),
            })
        }
    }

    fn read_file(path: &Path) -> ConfigResult<PlannerConfig> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn with_source(config: PlannerConfig, source: ConfigSource) -> ConfigResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config, source })
    }
}
