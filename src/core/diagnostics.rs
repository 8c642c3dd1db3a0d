use serde::{Deserialize, Serialize};

use crate::ledger::{DateParseError, RecordId, TransactionRecord};

/// Why a record was left out of a date-scoped result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "reason")]
pub enum SkipReason {
    InvalidDate { raw: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub reason: SkipReason,
}

impl SkippedRecord {
    pub(crate) fn invalid_date(record: &TransactionRecord, err: DateParseError) -> Self {
        tracing::warn!(
            record = %record.id,
            date = %err.input,
            "skipping record with unparseable date"
        );
        Self {
            id: record.id.clone(),
            reason: SkipReason::InvalidDate { raw: err.input },
        }
    }
}

/// A computed value plus the records that had to be excluded from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screened<T> {
    pub value: T,
    pub skipped: Vec<SkippedRecord>,
}

impl<T> Screened<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            skipped: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Screened<U> {
        Screened {
            value: f(self.value),
            skipped: self.skipped,
        }
    }

    pub fn into_parts(self) -> (T, Vec<SkippedRecord>) {
        (self.value, self.skipped)
    }
}
