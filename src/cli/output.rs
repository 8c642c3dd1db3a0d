use colored::Colorize;

use crate::{
    config::Config,
    core::{services::DashboardSummary, CategoryTotal, MonthlyBucket, SkippedRecord},
    currency::{format_currency, format_ratio, CurrencyCode, LocaleConfig},
    ledger::{display_label, Interval, Language, TransactionKind},
    utils::build_info::BuildMetadata,
};

const LABEL_WIDTH: usize = 12;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Currency and language choices applied to every rendered amount.
#[derive(Debug, Clone)]
pub struct Presentation {
    pub currency: CurrencyCode,
    pub locale: LocaleConfig,
    pub language: Language,
}

impl Presentation {
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency: config.currency_code(),
            locale: config.locale_config(),
            language: config.language(),
        }
    }

    pub fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.currency, &self.locale)
    }

    fn category(&self, code: &str) -> String {
        display_label(code, self.language)
    }
}

fn section(title: &str) -> String {
    format!("=== {} ===", title.trim()).bold().to_string()
}

fn warning(message: &str) -> String {
    format!("WARNING: [!] {message}").bright_yellow().to_string()
}

fn row(label: &str, value: impl AsRef<str>) -> String {
    format!("{label:<LABEL_WIDTH$}{}", value.as_ref())
}

fn signed(text: String, amount: f64) -> String {
    if amount < 0.0 {
        text.bright_red().to_string()
    } else {
        text.bright_green().to_string()
    }
}

fn describe_interval(interval: &Interval) -> String {
    match interval.window() {
        Some(window) => format!(
            "{} to {}",
            window.start.format(DATE_FORMAT),
            window.end.format(DATE_FORMAT)
        ),
        None => "all dates".to_string(),
    }
}

fn percent(share: f64) -> String {
    format!("{:>5.1}%", share * 100.0)
}

fn category_rows(lines: &mut Vec<String>, totals: &[CategoryTotal], view: &Presentation) {
    if totals.is_empty() {
        lines.push("  (none)".to_string());
        return;
    }
    let width = totals
        .iter()
        .map(|total| view.category(&total.category).chars().count())
        .max()
        .unwrap_or(0);
    for total in totals {
        let label = view.category(&total.category);
        let pad = width.saturating_sub(label.chars().count());
        lines.push(format!(
            "  {label}{}  {}  {}",
            " ".repeat(pad),
            view.money(total.amount),
            percent(total.share)
        ));
    }
}

/// `None` when nothing was skipped.
pub fn render_skipped(skipped: &[SkippedRecord]) -> Option<String> {
    if skipped.is_empty() {
        return None;
    }
    let ids: Vec<String> = skipped.iter().map(|record| record.id.to_string()).collect();
    Some(warning(&format!(
        "skipped {} record(s) with unparseable dates: {}",
        skipped.len(),
        ids.join(", ")
    )))
}

pub fn render_summary(summary: &DashboardSummary, view: &Presentation) -> String {
    let totals = &summary.totals;
    let mut lines = vec![
        section(&format!("Summary: {}", summary.selection.period.label())),
        row("Window", describe_interval(&summary.interval)),
        row("Status", summary.selection.status.as_str()),
        row("Records", totals.count.to_string()),
        row("Income", view.money(totals.income)),
        row("Expenses", view.money(totals.expenses)),
        row("Balance", signed(view.money(totals.balance), totals.balance)),
        row("Ratio", format_ratio(summary.income_expense_ratio)),
        String::new(),
        "Income by category".bold().to_string(),
    ];
    category_rows(&mut lines, &summary.income_by_category, view);
    lines.push("Expenses by category".bold().to_string());
    category_rows(&mut lines, &summary.expenses_by_category, view);

    let credit = &summary.credit;
    lines.push(String::new());
    lines.push("Credit".bold().to_string());
    lines.push(row("  Total", view.money(credit.total_amount)));
    lines.push(row("  Remaining", view.money(credit.remaining_amount)));
    lines.push(row("  Monthly", view.money(credit.monthly_payments)));
    lines.push(row("  Active", credit.active_count.to_string()));

    if let Some(skipped) = render_skipped(&summary.skipped) {
        lines.push(skipped);
    }
    lines.join("\n")
}

pub fn render_trend(buckets: &[MonthlyBucket], cumulative: &[f64], view: &Presentation) -> String {
    let mut lines = vec![section(&format!("Trend: last {} months", buckets.len()))];
    if buckets.is_empty() {
        lines.push("(no months requested)".to_string());
        return lines.join("\n");
    }
    lines.push(format!(
        "{:<10}{:>16}{:>16}{:>16}{:>16}",
        "Month", "Income", "Expenses", "Balance", "Cumulative"
    ));
    for (bucket, running) in buckets.iter().zip(cumulative) {
        let balance = format!("{:>16}", view.money(bucket.balance));
        lines.push(format!(
            "{:<10}{:>16}{:>16}{}{:>16}",
            bucket.label(),
            view.money(bucket.income),
            view.money(bucket.expense),
            signed(balance, bucket.balance),
            view.money(*running)
        ));
    }
    lines.join("\n")
}

pub fn render_categories(
    kind: &TransactionKind,
    interval: &Interval,
    totals: &[CategoryTotal],
    view: &Presentation,
) -> String {
    let grand_total: f64 = totals.iter().map(|total| total.amount).sum();
    let mut lines = vec![
        section(&format!("Categories: {kind}")),
        row("Window", describe_interval(interval)),
        row("Total", view.money(grand_total)),
    ];
    category_rows(&mut lines, totals, view);
    lines.join("\n")
}

pub fn render_version(meta: &BuildMetadata) -> String {
    format!("{}\nrustc: {}", meta.summary(), meta.rustc)
}
