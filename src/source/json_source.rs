use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::write_atomic,
    errors::{EstateError, Result},
    ledger::TransactionRecord,
};

use super::{SourceQuery, TransactionSource};

const DATA_KEY: &str = "data";

/// Reads a JSON export of the transaction collection from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionSource for JsonFileSource {
    fn fetch(&self, query: &SourceQuery) -> Result<Vec<TransactionRecord>> {
        load_records_from_file(&self.path).map(|records| query.apply(records))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn load_records_from_file(path: &Path) -> Result<Vec<TransactionRecord>> {
    if !path.exists() {
        return Err(EstateError::Source(format!(
            "transaction file `{}` not found",
            path.display()
        )));
    }
    let data = fs::read_to_string(path)?;
    parse_records(&data)
}

/// Accepts either a bare array or the `{ "data": [...] }` envelope the REST
/// endpoint returns.
pub fn parse_records(data: &str) -> Result<Vec<TransactionRecord>> {
    let value: Value = serde_json::from_str(data)?;
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove(DATA_KEY) {
            Some(inner @ Value::Array(_)) => inner,
            _ => {
                return Err(EstateError::Source(
                    "expected an array of transactions or an object with a `data` array"
                        .into(),
                ))
            }
        },
        _ => {
            return Err(EstateError::Source(
                "expected an array of transactions".into(),
            ))
        }
    };
    Ok(serde_json::from_value(items)?)
}

pub fn save_records_to_file(records: &[TransactionRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    write_atomic(path, &json)
}
