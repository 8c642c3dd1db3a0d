//! Record selection by status, type, property and date interval.
//!
//! Every filter is an independent predicate over borrowed records, so calls
//! chain in any order and yield the same set.

use chrono::NaiveDateTime;

use super::diagnostics::{Screened, SkippedRecord};
use crate::ledger::{
    resolve_period_with, Interval, PeriodBoundary, PeriodKind, StatusFilter, TransactionKind,
    TransactionRecord,
};

pub fn filter_by_status<'a, I>(records: I, status: &StatusFilter) -> Vec<&'a TransactionRecord>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records
        .into_iter()
        .filter(|record| status.matches(&record.status))
        .collect()
}

/// Exact match on type; an unrecognized `kind` selects nothing.
pub fn filter_by_type<'a, I>(records: I, kind: &TransactionKind) -> Vec<&'a TransactionRecord>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    if !kind.is_known() {
        return Vec::new();
    }
    records
        .into_iter()
        .filter(|record| &record.kind == kind)
        .collect()
}

pub fn filter_by_property<'a, I>(records: I, property_id: &str) -> Vec<&'a TransactionRecord>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records
        .into_iter()
        .filter(|record| record.property_id.as_deref() == Some(property_id))
        .collect()
}

/// Keeps records dated inside `interval`. Records whose date does not parse
/// are dropped and reported, except under `Interval::All` where dates are not
/// examined at all.
pub fn filter_by_interval<'a, I>(
    records: I,
    interval: &Interval,
) -> Screened<Vec<&'a TransactionRecord>>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let window = match interval {
        Interval::All => return Screened::clean(records.into_iter().collect()),
        Interval::Window(window) => window,
    };

    let mut kept = Vec::new();
    let mut skipped = Vec::new();
    for record in records {
        match record.parsed_date() {
            Ok(date) if window.contains(date) => kept.push(record),
            Ok(_) => {}
            Err(err) => skipped.push(SkippedRecord::invalid_date(record, err)),
        }
    }
    Screened {
        value: kept,
        skipped,
    }
}

pub fn filter_by_period<'a, I>(
    records: I,
    period: PeriodKind,
    now: NaiveDateTime,
    boundary: PeriodBoundary,
) -> Screened<Vec<&'a TransactionRecord>>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let interval = resolve_period_with(period, now, boundary);
    filter_by_interval(records, &interval)
}
