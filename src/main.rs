// ==========================================
// 联盟广告投放规划系统 - 命令行主入口
// ==========================================
// 输出: stdout 为报告（文本 / JSON），stderr 为日志与错误提示
// ==========================================

use affiliate_ad_planner::api::ApiError;
use affiliate_ad_planner::app::{execute, CliArgs};
use affiliate_ad_planner::config::ConfigManager;
use affiliate_ad_planner::{i18n, logging};
use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            // 已归类的错误给出本地化提示，其余直接输出错误链
            match err.downcast_ref::<ApiError>() {
                Some(api_err) => eprintln!("{}", api_err.user_message()),
                None => eprintln!("{:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> anyhow::Result<String> {
    let mut config = ConfigManager::load(args.config.as_deref())
        .map_err(ApiError::from)
        .context("加载配置失败")?;

    if let Some(lang) = args.lang.as_deref() {
        config.override_locale(lang).map_err(ApiError::from)?;
    }
    i18n::set_locale(&config.config().locale);
    logging::init_with_format(config.config().log_format);

    tracing::info!(
        version = affiliate_ad_planner::VERSION,
        source = ?config.source(),
        "{} 启动",
        affiliate_ad_planner::APP_NAME
    );

    Ok(execute(args, config)?)
}
