use chrono::{NaiveDate, NaiveDateTime};

use crate::core::services::{DashboardService, WidgetSelection};
use crate::ledger::{
    PeriodBoundary, PeriodKind, StatusFilter, TransactionKind, TransactionRecord,
    TransactionStatus,
};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 10)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap()
}

fn portfolio() -> Vec<TransactionRecord> {
    vec![
        TransactionRecord::new(1, TransactionKind::Income, 950.0, "2024-04-05")
            .with_status(TransactionStatus::Completed)
            .with_category("rent")
            .with_property("p-1", "Rue des Lilas"),
        TransactionRecord::new(2, TransactionKind::Income, 950.0, "2024-05-05")
            .with_status(TransactionStatus::Pending)
            .with_category("rent")
            .with_property("p-1", "Rue des Lilas"),
        TransactionRecord::new(3, TransactionKind::Expense, 120.0, "2024-05-02")
            .with_status(TransactionStatus::Completed)
            .with_category("maintenance")
            .with_property("p-1", "Rue des Lilas"),
        TransactionRecord::new(4, TransactionKind::Expense, 60.0, "2024-06-20")
            .with_status(TransactionStatus::Pending)
            .with_property("p-2", "Quai Ouest"),
        TransactionRecord::new(5, TransactionKind::Income, 700.0, "2024-01-10")
            .with_status(TransactionStatus::Completed)
            .with_category("rent")
            .with_property("p-2", "Quai Ouest"),
        TransactionRecord::new(6, TransactionKind::Expense, 45.0, "31/05/2024")
            .with_status(TransactionStatus::Completed)
            .with_property("p-2", "Quai Ouest"),
        TransactionRecord::new(7, TransactionKind::Credit, 180_000.0, "2019-09-01")
            .with_status(TransactionStatus::Active)
            .with_monthly_payment(910.0)
            .with_property("p-1", "Rue des Lilas"),
    ]
}

#[test]
fn quarter_summary_spans_april_to_june() {
    let records = portfolio();
    let selection = WidgetSelection::new(PeriodKind::ThisQuarter, StatusFilter::All);
    let summary = DashboardService::summarize(&records, &selection, now());

    assert_eq!(summary.totals.income, 1900.0);
    assert_eq!(summary.totals.expenses, 180.0);
    assert_eq!(summary.totals.balance, 1720.0);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.expenses_by_category[0].category, "maintenance");
    assert_eq!(summary.expenses_by_category[1].category, "uncategorized");
}

#[test]
fn boundary_now_drops_future_dated_records() {
    let records = portfolio();
    let selection = WidgetSelection::new(PeriodKind::ThisQuarter, StatusFilter::All)
        .with_boundary(PeriodBoundary::Now);
    let summary = DashboardService::summarize(&records, &selection, now());
    assert_eq!(summary.totals.expenses, 120.0);
}

#[test]
fn status_and_property_narrow_the_summary() {
    let records = portfolio();
    let selection = WidgetSelection::new(
        PeriodKind::ThisYear,
        StatusFilter::Only(TransactionStatus::Completed),
    )
    .with_property("p-1");
    let summary = DashboardService::summarize(&records, &selection, now());

    assert_eq!(summary.totals.income, 950.0);
    assert_eq!(summary.totals.expenses, 120.0);
    assert_eq!(summary.credit.total_amount, 180_000.0);
    assert_eq!(summary.credit.monthly_payments, 910.0);
    assert!(summary.skipped.is_empty());
}

#[test]
fn ratio_is_infinite_without_expenses() {
    let records = vec![TransactionRecord::new(1, TransactionKind::Income, 500.0, "2024-05-01")];
    let selection = WidgetSelection::new(PeriodKind::ThisMonth, StatusFilter::All);
    let summary = DashboardService::summarize(&records, &selection, now());
    assert!(summary.income_expense_ratio.is_infinite());
}

#[test]
fn trend_ignores_period_and_reports_bad_dates() {
    let records = portfolio();
    let selection = WidgetSelection::new(PeriodKind::ThisMonth, StatusFilter::All);
    let trend = DashboardService::trend(&records, &selection, 6, now());

    assert_eq!(trend.value.len(), 6);
    assert_eq!(trend.value[0].month, 12);
    assert_eq!(trend.value[1].income, 700.0);
    assert_eq!(trend.value[5].balance, 830.0);
    assert_eq!(trend.skipped.len(), 1);
}

#[test]
fn category_breakdown_is_ranked() {
    let records = portfolio();
    let selection = WidgetSelection::new(PeriodKind::All, StatusFilter::All);
    let breakdown = DashboardService::category_breakdown(
        &records,
        &selection,
        &TransactionKind::Income,
        now(),
    );
    assert_eq!(breakdown.value.len(), 1);
    assert_eq!(breakdown.value[0].category, "rent");
    assert_eq!(breakdown.value[0].amount, 2600.0);
    assert!(breakdown.is_clean());
}

#[test]
fn summarize_is_idempotent() {
    let records = portfolio();
    let selection = WidgetSelection::new(PeriodKind::LastYear, StatusFilter::All);
    let first = DashboardService::summarize(&records, &selection, now());
    let second = DashboardService::summarize(&records, &selection, now());
    assert_eq!(first, second);
}

#[test]
fn credit_overview_follows_property_scope() {
    let records = portfolio();
    let everywhere = WidgetSelection::new(PeriodKind::ThisMonth, StatusFilter::All);
    let overview = DashboardService::credit_overview(&records, &everywhere);
    assert_eq!(overview.total_amount, 180_000.0);
    assert_eq!(overview.remaining_amount, 180_000.0);
    assert_eq!(overview.active_count, 1);

    let elsewhere = everywhere.with_property("p-2");
    assert_eq!(
        DashboardService::credit_overview(&records, &elsewhere).total_amount,
        0.0
    );
}
