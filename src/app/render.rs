// ==========================================
// 联盟广告投放规划系统 - 文本报告渲染
// ==========================================
// 职责: 将 AdvisoryReport 渲染为本地化的终端文本
// 红线: 只读报告，不做任何计算（份额合计除外）
// ==========================================

use crate::domain::advisory::{AdvisoryReport, AllocationPlan, ChannelOverview};
use crate::i18n::{t, t_with_args};
use std::fmt::Write;

const CURRENCY: &str = "฿";

/// 金额格式化: 千分位 + 两位小数（如 ฿1,234.50 / -฿40.00）
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, CURRENCY, grouped, cents % 100)
}

/// 百分比格式化（输入已是百分数，如 25.0 -> "25.00%"）
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

fn format_share(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "-- {} --", title);
}

fn line(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {:<40} {}", label, value);
}

/// 渲染完整文本报告
pub fn render_text(report: &AdvisoryReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", t("app.title"));
    let _ = writeln!(
        out,
        "{}",
        t_with_args(
            "dataset.loaded",
            &[
                ("total", report.dataset.total_rows.to_string().as_str()),
                ("clean", report.dataset.clean_rows.to_string().as_str()),
                ("excluded", report.dataset.excluded_rows.to_string().as_str()),
            ],
        )
    );

    // ===== 汇总卡片 =====
    let projection = &report.projection;
    section(&mut out, &t("summary.header"));
    line(&mut out, &t("summary.ad_cost"), &format_money(projection.estimated_ad_cost));
    line(&mut out, &t("summary.commission"), &format_money(projection.estimated_commission));
    line(&mut out, &t("summary.net_profit"), &format_money(projection.net_profit));
    line(&mut out, &t("summary.roi"), &format_percent(projection.roi_percent));

    // ===== 分配表 =====
    section(&mut out, &t("allocation.header"));
    render_allocation(&mut out, &report.allocation);

    // ===== 渠道概览 =====
    if !report.overview.is_empty() {
        section(&mut out, &t("overview.header"));
        render_overview(&mut out, &report.overview);
    }

    // ===== 历史均值 =====
    let rates = &report.rates;
    section(&mut out, &t("averages.header"));
    let cpc = rates
        .avg_cpc
        .map(format_money)
        .unwrap_or_else(|| t("averages.not_available"));
    line(&mut out, &t("averages.cpc"), &cpc);
    line(&mut out, &t("averages.cost_per_order"), &format_money(rates.avg_cost_per_order));
    line(
        &mut out,
        &t("averages.commission_rate"),
        &format_share(rates.avg_commission_rate),
    );

    // ===== 投资计划 =====
    section(&mut out, &t("plan.header"));
    line(&mut out, &t("plan.budget"), &format_money(projection.estimated_ad_cost));
    line(&mut out, &t("plan.expected_return"), &format_money(report.expected_return));
    line(&mut out, &t("plan.net_profit"), &format_money(projection.net_profit));
    line(&mut out, &t("plan.roi"), &format_percent(projection.roi_percent));

    // ===== 策略提示 =====
    section(&mut out, &t("strategy.header"));
    for key in ["strategy.focus_positive", "strategy.weighting", "strategy.start_small"] {
        let _ = writeln!(out, "  - {}", t(key));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", t(report.verdict.message_key()));

    out
}

fn render_allocation(out: &mut String, plan: &AllocationPlan) {
    if plan.is_empty() {
        let _ = writeln!(out, "  {}", t("allocation.empty"));
        return;
    }

    let _ = writeln!(
        out,
        "  {:<6} {:<20} {:>16} {:>16} {:>16} {:>12}",
        t("allocation.rank"),
        t("allocation.sub_id"),
        t("allocation.budget"),
        t("allocation.orders"),
        t("allocation.roi"),
        t("allocation.share"),
    );
    for entry in &plan.entries {
        let _ = writeln!(
            out,
            "  {:<6} {:<20} {:>16} {:>16} {:>16} {:>12}",
            entry.rank,
            entry.channel_id,
            format_money(entry.allocated_budget),
            entry.expected_orders,
            format_percent(entry.historical_roi),
            format_share(entry.budget_share),
        );
    }

    let unallocated = 1.0 - plan.total_share();
    if unallocated > 1e-9 {
        let _ = writeln!(
            out,
            "  {}",
            t_with_args("allocation.unallocated", &[("share", format_share(unallocated).as_str())])
        );
    }
}

fn render_overview(out: &mut String, overview: &[ChannelOverview]) {
    let _ = writeln!(
        out,
        "  {:<20} {:>16} {:>10} {:>16} {:>12}",
        t("allocation.sub_id"),
        t("overview.ad_cost"),
        t("overview.orders"),
        t("overview.commission"),
        t("overview.roi"),
    );
    let na = t("averages.not_available");
    for row in overview {
        let _ = writeln!(
            out,
            "  {:<20} {:>16} {:>10} {:>16} {:>12}",
            row.channel_id,
            format_money(row.ad_cost),
            row.order_count,
            row.total_commission.map(format_money).unwrap_or_else(|| na.clone()),
            row.roi_percent.map(format_percent).unwrap_or_else(|| na.clone()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::advisory::{
        AllocationEntry, ChannelOverview, DatasetSummary, Projection, RateEstimates,
    };
    use crate::domain::types::{RoiVerdict, WeightPolicy};
    use crate::i18n::{set_locale, tests::LOCALE_TEST_LOCK};

    fn sample_report(entries: Vec<AllocationEntry>) -> AdvisoryReport {
        AdvisoryReport {
            dataset: DatasetSummary {
                total_rows: 3,
                clean_rows: 2,
                excluded_rows: 1,
                exclusions: vec![],
            },
            rates: RateEstimates {
                avg_cpc: None,
                avg_cost_per_order: 50.0,
                avg_commission_rate: 0.3,
            },
            projection: Projection {
                target_orders: 100,
                bonus_amount: 0.0,
                estimated_ad_cost: 5000.0,
                estimated_commission: 1500.0,
                net_profit: -3500.0,
                roi_percent: -70.0,
            },
            expected_return: 1500.0,
            verdict: RoiVerdict::Risky,
            allocation: AllocationPlan {
                policy: WeightPolicy::Truncate,
                entries,
            },
            overview: vec![],
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "฿0.00");
        assert_eq!(format_money(999.5), "฿999.50");
        assert_eq!(format_money(1234567.891), "฿1,234,567.89");
        assert_eq!(format_money(-3500.0), "-฿3,500.00");
        assert_eq!(format_money(-0.001), "฿0.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(25.0), "25.00%");
        assert_eq!(format_percent(-40.0), "-40.00%");
    }

    #[test]
    fn test_render_text_sections() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");

        let report = sample_report(vec![AllocationEntry {
            rank: 1,
            channel_id: "fb_a".to_string(),
            allocated_budget: 1750.0,
            expected_orders: 35,
            historical_roi: 12.5,
            budget_share: 0.35,
        }]);
        let text = render_text(&report);

        assert!(text.contains("Recommended budget allocation"));
        assert!(text.contains("fb_a"));
        assert!(text.contains("฿1,750.00"));
        assert!(text.contains("Unallocated share: 65.0%"));
        assert!(text.contains("n/a"));
        assert!(text.contains("-฿3,500.00"));
        assert!(text.contains("Status: risky"));
    }

    #[test]
    fn test_render_overview_table() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");

        let mut report = sample_report(vec![]);
        report.overview = vec![
            ChannelOverview {
                channel_id: "m06Nasa1228".to_string(),
                ad_cost: 1200.0,
                order_count: 14,
                total_commission: Some(960.0),
                roi_percent: Some(-20.0),
            },
            ChannelOverview {
                channel_id: "no_com".to_string(),
                ad_cost: 50.0,
                order_count: 1,
                total_commission: None,
                roi_percent: None,
            },
        ];
        let text = render_text(&report);

        assert!(text.contains("Sub ID performance overview"));
        assert!(text.contains("m06Nasa1228"));
        assert!(text.contains("฿1,200.00"));
        assert!(text.contains("฿960.00"));
        assert!(text.contains("-20.00%"));
        let no_com_line = text.lines().find(|l| l.contains("no_com")).unwrap();
        assert!(no_com_line.contains("n/a"));
    }

    #[test]
    fn test_render_empty_allocation() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");

        let text = render_text(&sample_report(vec![]));
        assert!(text.contains("nothing to allocate"));
        assert!(!text.contains("Sub ID performance overview"));
        assert!(!text.contains("Unallocated share"));
    }
}
