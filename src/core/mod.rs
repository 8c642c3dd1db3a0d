//! Filtering, aggregation and bucketing over transaction snapshots.

pub mod aggregation;
pub mod diagnostics;
pub mod filters;
pub mod series;
pub mod services;
pub mod utils;

pub use aggregation::{
    calculate_balance, calculate_expenses, calculate_income, group_by_category,
    income_expense_ratio, rank_categories, ratio, remaining_credit_amount, sum_by_type,
    summarize_credits, summarize_totals, total_credit_amount, total_monthly_payments,
    CategoryTotal, CreditSummary, Totals,
};
pub use diagnostics::{Screened, SkipReason, SkippedRecord};
pub use filters::{
    filter_by_interval, filter_by_period, filter_by_property, filter_by_status, filter_by_type,
};
pub use series::{build_monthly_series, cumulative_balance, MonthlyBucket};
