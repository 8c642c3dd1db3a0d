#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use estate_core::{
    config::ConfigManager,
    ledger::{TransactionKind, TransactionRecord, TransactionStatus},
    source::save_records_to_file,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated app directory with a config manager pointing into it.
pub fn setup_test_env() -> (PathBuf, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (base, config_manager)
}

pub fn write_fixture(base: &std::path::Path, records: &[TransactionRecord]) -> PathBuf {
    let path = base.join("transactions.json");
    save_records_to_file(records, &path).expect("write fixture");
    path
}

pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid date")
}

pub fn completed(id: i64, kind: TransactionKind, amount: f64, date: &str) -> TransactionRecord {
    TransactionRecord::new(id, kind, amount, date).with_status(TransactionStatus::Completed)
}

/// Two properties over a year and a half, plus one malformed date and one credit.
pub fn portfolio() -> Vec<TransactionRecord> {
    vec![
        completed(1, TransactionKind::Income, 950.0, "2023-11-05")
            .with_category("rent")
            .with_property("p-1", "Rue des Lilas"),
        completed(2, TransactionKind::Income, 950.0, "2024-03-05T09:30:00Z")
            .with_category("rent")
            .with_property("p-1", "Rue des Lilas"),
        completed(3, TransactionKind::Expense, 220.0, "2024-03-18")
            .with_category("repairs")
            .with_property("p-1", "Rue des Lilas"),
        completed(4, TransactionKind::Income, 700.0, "2024-04-02")
            .with_category("rent")
            .with_property("p-2", "Quai Ouest"),
        TransactionRecord::new(5, TransactionKind::Expense, 90.0, "2024-05-06")
            .with_category("charges")
            .with_property("p-2", "Quai Ouest"),
        completed(6, TransactionKind::Expense, 35.0, "not-a-date")
            .with_property("p-2", "Quai Ouest"),
        TransactionRecord::new(7, TransactionKind::Credit, 120_000.0, "2020-01-15")
            .with_status(TransactionStatus::Active)
            .with_monthly_payment(640.0)
            .with_property("p-1", "Rue des Lilas"),
        TransactionRecord::new(8, TransactionKind::Other("refund".into()), 15.0, "2024-05-07"),
    ]
}
