//! Monthly time series for trend and evolution charts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::diagnostics::{Screened, SkippedRecord};
use crate::ledger::{MonthKey, TransactionKind, TransactionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub credit: f64,
    pub balance: f64,
    pub count: usize,
}

impl MonthlyBucket {
    fn empty(key: MonthKey) -> Self {
        Self {
            year: key.year,
            month: key.month,
            income: 0.0,
            expense: 0.0,
            credit: 0.0,
            balance: 0.0,
            count: 0,
        }
    }

    pub fn key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month,
        }
    }

    pub fn label(&self) -> String {
        self.key().label()
    }

    fn add(&mut self, record: &TransactionRecord) {
        self.count += 1;
        match record.kind {
            TransactionKind::Income => self.income += record.amount,
            TransactionKind::Expense => self.expense += record.amount,
            TransactionKind::Credit => self.credit += record.amount,
            TransactionKind::Other(_) => {}
        }
    }
}

/// Builds `window_months` consecutive monthly buckets, oldest first, the last
/// one being the month of `anchor`.
pub fn build_monthly_series<'a, I>(
    records: I,
    window_months: u32,
    anchor: NaiveDateTime,
) -> Screened<Vec<MonthlyBucket>>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    if window_months == 0 {
        return Screened::clean(Vec::new());
    }

    let last = MonthKey::of(&anchor);
    let first = last.shift(-(window_months as i64 - 1));
    let first_index = first.index();
    let mut buckets: Vec<MonthlyBucket> = (0..window_months as i64)
        .map(|offset| MonthlyBucket::empty(first.shift(offset)))
        .collect();

    let mut skipped = Vec::new();
    for record in records {
        let date = match record.parsed_date() {
            Ok(date) => date,
            Err(err) => {
                skipped.push(SkippedRecord::invalid_date(record, err));
                continue;
            }
        };
        let slot = MonthKey::of(&date).index() - first_index;
        if let Some(bucket) = usize::try_from(slot)
            .ok()
            .and_then(|slot| buckets.get_mut(slot))
        {
            bucket.add(record);
        }
    }

    for bucket in &mut buckets {
        bucket.balance = bucket.income - bucket.expense;
    }
    tracing::debug!(
        months = window_months,
        from = %first,
        to = %last,
        skipped = skipped.len(),
        "built monthly series"
    );

    Screened {
        value: buckets,
        skipped,
    }
}

/// Running total of each bucket's balance.
pub fn cumulative_balance(buckets: &[MonthlyBucket]) -> Vec<f64> {
    buckets
        .iter()
        .scan(0.0, |running, bucket| {
            *running += bucket.balance;
            Some(*running)
        })
        .collect()
}
