// ==========================================
// 联盟广告投放规划系统 - 应用层
// ==========================================
// 职责: 命令行集成，连接终端与 API
// ==========================================

pub mod cli;
pub mod render;

// 重导出
pub use cli::{execute, CliArgs, OutputFormat};
pub use render::{format_money, format_percent, render_text};
