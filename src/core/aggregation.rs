//! Sums, balances, category breakdowns and credit totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::filters::filter_by_type;
use crate::ledger::{TransactionKind, TransactionRecord, TransactionStatus};

/// Unknown kinds sum to zero, matching `filter_by_type`.
pub fn sum_by_type<'a, I>(records: I, kind: &TransactionKind) -> f64
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    if !kind.is_known() {
        return 0.0;
    }
    records
        .into_iter()
        .filter(|record| &record.kind == kind)
        .map(|record| record.amount)
        .sum()
}

pub fn calculate_income<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    sum_by_type(records, &TransactionKind::Income)
}

pub fn calculate_expenses<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    sum_by_type(records, &TransactionKind::Expense)
}

pub fn calculate_balance<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let totals = summarize_totals(records);
    totals.balance
}

/// Quotient with the dashboard's zero policy: `x / 0` is infinite for a
/// positive `x` and `0 / 0` is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else if numerator > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

pub fn income_expense_ratio<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let totals = summarize_totals(records);
    ratio(totals.income, totals.expenses)
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub credit: f64,
    pub balance: f64,
    pub count: usize,
}

/// Single pass over `records` producing every headline total.
pub fn summarize_totals<'a, I>(records: I) -> Totals
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut totals = Totals::default();
    for record in records {
        totals.count += 1;
        match record.kind {
            TransactionKind::Income => totals.income += record.amount,
            TransactionKind::Expense => totals.expenses += record.amount,
            TransactionKind::Credit => totals.credit += record.amount,
            TransactionKind::Other(_) => {}
        }
    }
    totals.balance = totals.income - totals.expenses;
    totals
}

/// Totals per normalized category for records of `kind`. Empty for unknown kinds.
pub fn group_by_category<'a, I>(records: I, kind: &TransactionKind) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut groups = BTreeMap::new();
    for record in filter_by_type(records, kind) {
        *groups
            .entry(record.category_code().to_string())
            .or_insert(0.0) += record.amount;
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
    /// Share of the group's total in `[0, 1]`; zero when the total is zero.
    pub share: f64,
}

/// Largest amount first; equal amounts are ordered by category code.
pub fn rank_categories(groups: &BTreeMap<String, f64>) -> Vec<CategoryTotal> {
    let total: f64 = groups.values().sum();
    let mut ranked: Vec<CategoryTotal> = groups
        .iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.clone(),
            amount: *amount,
            share: ratio(*amount, total).min(1.0),
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    ranked
}

pub fn total_credit_amount<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    sum_by_type(records, &TransactionKind::Credit)
}

/// Credit still owed: every credit record not yet `completed`.
pub fn remaining_credit_amount<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records
        .into_iter()
        .filter(|record| {
            record.kind == TransactionKind::Credit
                && record.status != TransactionStatus::Completed
        })
        .map(|record| record.amount)
        .sum()
}

pub fn total_monthly_payments<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records
        .into_iter()
        .filter(|record| is_active_credit(record))
        .filter_map(|record| record.monthly_payment)
        .sum()
}

fn is_active_credit(record: &TransactionRecord) -> bool {
    record.kind == TransactionKind::Credit && record.status == TransactionStatus::Active
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummary {
    pub total_amount: f64,
    pub remaining_amount: f64,
    pub monthly_payments: f64,
    pub active_count: usize,
}

pub fn summarize_credits<'a, I>(records: I) -> CreditSummary
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut summary = CreditSummary::default();
    for record in records
        .into_iter()
        .filter(|record| record.kind == TransactionKind::Credit)
    {
        summary.total_amount += record.amount;
        if record.status != TransactionStatus::Completed {
            summary.remaining_amount += record.amount;
        }
        if is_active_credit(record) {
            summary.active_count += 1;
            summary.monthly_payments += record.monthly_payment.unwrap_or(0.0);
        }
    }
    summary
}
