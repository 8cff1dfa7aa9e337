// ==========================================
// 联盟广告投放规划系统 - 命令行参数
// ==========================================
// 职责: 参数定义 + 单次分析执行（不含进程退出码处理）
// ==========================================

use crate::api::{ApiError, ApiResult, PlannerApi};
use crate::app::render::render_text;
use crate::config::ConfigManager;
use crate::domain::advisory::CampaignTarget;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "affiliate-ad-planner",
    version,
    about = "Plan affiliate ad spend from historical Sub ID performance",
    after_help = "Examples:\n  affiliate-ad-planner --file report.csv\n  affiliate-ad-planner --file report.xlsx --target-orders 250 --bonus 0 --format json\n  affiliate-ad-planner --file report.csv --lang th"
)]
pub struct CliArgs {
    #[arg(long, short = 'f', help = "Performance report (.csv, .xlsx, .xls)")]
    pub file: PathBuf,

    #[arg(long, default_value_t = 100, help = "Number of orders the campaign must reach")]
    pub target_orders: u64,

    #[arg(long, default_value_t = 5000.0, help = "Bonus paid when the target is reached")]
    pub bonus: f64,

    #[arg(long, help = "Config file (defaults to the user config directory)")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, help = "Output language: en, th, zh-CN")]
    pub lang: Option<String>,
}

impl CliArgs {
    pub fn target(&self) -> CampaignTarget {
        CampaignTarget::new(self.target_orders, self.bonus)
    }
}

/// 执行一次分析，返回待打印的输出
pub fn execute(args: &CliArgs, config: ConfigManager) -> ApiResult<String> {
    let api = PlannerApi::new(config)?;
    let report = api.analyze_file(&args.file, args.target())?;

    match args.format {
        OutputFormat::Text => Ok(render_text(&report)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report).map_err(|e| ApiError::ValueError(e.to_string()))
        }
    }
}
