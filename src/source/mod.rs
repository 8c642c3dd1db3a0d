//! Boundary with whatever serves the transaction collection.
//!
//! The core never fetches on its own: a [`DataSource`] owns the last snapshot
//! and reports one of three states, and only `Ready` data is handed to the
//! aggregation functions.

pub mod json_source;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{EstateError, Result},
    ledger::TransactionRecord,
};

pub use json_source::{
    load_records_from_file, parse_records, save_records_to_file, JsonFileSource,
};

/// Optional scoping forwarded to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
}

impl SourceQuery {
    pub fn for_property(property_id: impl Into<String>) -> Self {
        Self {
            property_id: Some(property_id.into()),
        }
    }

    /// Applies the scope locally, for sources that cannot filter server-side.
    pub fn apply(&self, mut records: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
        if let Some(property_id) = self.property_id.as_deref() {
            records.retain(|record| record.property_id.as_deref() == Some(property_id));
        }
        records
    }
}

pub trait TransactionSource: Send + Sync {
    fn fetch(&self, query: &SourceQuery) -> Result<Vec<TransactionRecord>>;

    fn describe(&self) -> String {
        "transaction source".to_string()
    }
}

/// In-memory source, mostly for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<TransactionRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }
}

impl TransactionSource for StaticSource {
    fn fetch(&self, query: &SourceQuery) -> Result<Vec<TransactionRecord>> {
        Ok(query.apply(self.records.clone()))
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }
}

/// What a consumer may do with the data right now.
#[derive(Debug)]
pub enum FetchState<'a> {
    /// Nothing fetched yet.
    Loading,
    Failed(&'a EstateError),
    Ready(&'a [TransactionRecord]),
}

impl<'a> FetchState<'a> {
    pub fn records(&self) -> Option<&'a [TransactionRecord]> {
        match self {
            FetchState::Ready(records) => Some(records),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&'a EstateError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Ready but with no records; widgets render their empty state.
    pub fn is_empty(&self) -> bool {
        matches!(self, FetchState::Ready(records) if records.is_empty())
    }
}

#[derive(Debug)]
struct Snapshot {
    records: Vec<TransactionRecord>,
    fetched_at: NaiveDateTime,
}

/// Caches the last successful fetch and tracks staleness.
pub struct DataSource<S> {
    source: S,
    query: SourceQuery,
    stale_after: Duration,
    snapshot: Option<Snapshot>,
    last_error: Option<EstateError>,
    version: u64,
}

impl<S: TransactionSource> DataSource<S> {
    pub fn new(source: S, stale_after: Duration) -> Self {
        Self {
            source,
            query: SourceQuery::default(),
            stale_after,
            snapshot: None,
            last_error: None,
            version: 0,
        }
    }

    pub fn with_query(mut self, query: SourceQuery) -> Self {
        self.query = query;
        self
    }

    /// A failed fetch masks the previous snapshot until a fetch succeeds again.
    pub fn state(&self) -> FetchState<'_> {
        if let Some(err) = &self.last_error {
            return FetchState::Failed(err);
        }
        match &self.snapshot {
            Some(snapshot) => FetchState::Ready(&snapshot.records),
            None => FetchState::Loading,
        }
    }

    pub fn refetch(&mut self, now: NaiveDateTime) -> FetchState<'_> {
        match self.source.fetch(&self.query) {
            Ok(records) => {
                self.version += 1;
                tracing::info!(
                    source = %self.source.describe(),
                    records = records.len(),
                    version = self.version,
                    "fetched transactions"
                );
                self.snapshot = Some(Snapshot {
                    records,
                    fetched_at: now,
                });
                self.last_error = None;
            }
            Err(err) => {
                tracing::warn!(source = %self.source.describe(), error = %err, "fetch failed");
                self.last_error = Some(err);
            }
        }
        self.state()
    }

    pub fn is_stale(&self, now: NaiveDateTime) -> bool {
        match &self.snapshot {
            Some(snapshot) => now - snapshot.fetched_at >= self.stale_after,
            None => true,
        }
    }

    /// Refetches only when the snapshot is missing or older than the staleness window.
    pub fn ensure_fresh(&mut self, now: NaiveDateTime) -> FetchState<'_> {
        if self.is_stale(now) {
            self.refetch(now)
        } else {
            self.state()
        }
    }

    /// Bumped on every successful fetch; usable as a cache key.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn fetched_at(&self) -> Option<NaiveDateTime> {
        self.snapshot.as_ref().map(|snapshot| snapshot.fetched_at)
    }

    /// Consumes the adapter, yielding the snapshot or the fetch error.
    pub fn into_result(self) -> Result<Vec<TransactionRecord>> {
        if let Some(err) = self.last_error {
            return Err(err);
        }
        self.snapshot
            .map(|snapshot| snapshot.records)
            .ok_or_else(|| EstateError::Source("transactions have not been fetched yet".into()))
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
