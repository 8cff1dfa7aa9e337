// ==========================================
// 联盟广告投放规划系统 - 规划 API
// ==========================================
// 职责: 对外唯一编程入口（文件 / 已解析表格 / 类型化记录）
// 输出: AdvisoryReport（可序列化为 JSON，交给展示层渲染）
// ==========================================

use crate::api::error::ApiResult;
use crate::config::{ConfigManager, PlannerConfig};
use crate::domain::advisory::{AdvisoryReport, CampaignTarget};
use crate::domain::performance::RawPerformanceRecord;
use crate::engine::CampaignAdvisor;
use crate::importer::{DatasetImporter, RawTable};
use std::path::Path;
use tracing::{info, warn};

pub struct PlannerApi {
    config: ConfigManager,
    importer: DatasetImporter,
    advisor: CampaignAdvisor,
}

impl PlannerApi {
    /// 按配置创建
    pub fn new(config: ConfigManager) -> ApiResult<Self> {
        let advisor = CampaignAdvisor::from_config(config.config())?;
        Ok(Self {
            config,
            importer: DatasetImporter::with_defaults(),
            advisor,
        })
    }

    /// 使用内置默认配置
    pub fn with_defaults() -> ApiResult<Self> {
        Self::new(ConfigManager::from_config(PlannerConfig::default())?)
    }

    pub fn config(&self) -> &PlannerConfig {
        self.config.config()
    }

    /// 分析文件（CSV / Excel）
    pub fn analyze_file<P: AsRef<Path>>(
        &self,
        file_path: P,
        target: CampaignTarget,
    ) -> ApiResult<AdvisoryReport> {
        let outcome = self.importer.import_file(file_path)?;
        self.analyze_records(&outcome.records, target)
    }

    /// 分析已解析的表格（展示层自行读取文件时使用）
    pub fn analyze_table(&self, table: &RawTable, target: CampaignTarget) -> ApiResult<AdvisoryReport> {
        let outcome = self.importer.map_table(table)?;
        self.analyze_records(&outcome.records, target)
    }

    /// 分析类型化记录
    pub fn analyze_records(
        &self,
        records: &[RawPerformanceRecord],
        target: CampaignTarget,
    ) -> ApiResult<AdvisoryReport> {
        match self.advisor.advise(records, target) {
            Ok(report) => {
                info!(
                    clean_rows = report.dataset.clean_rows,
                    verdict = %report.verdict,
                    "分析完成"
                );
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "分析终止");
                Err(e.into())
            }
        }
    }
}
