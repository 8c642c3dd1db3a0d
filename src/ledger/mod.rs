//! Transaction records, categories and reporting periods.

pub mod calendar;
pub mod category;
pub mod period;
pub mod record;

pub use calendar::MonthKey;
pub use category::{display_label, normalize_category, Language, UNCATEGORIZED};
pub use period::{
    quarter_bounds, resolve_period, resolve_period_with, DateWindow, Interval, PeriodBoundary,
    PeriodKind,
};
pub use record::{
    parse_record_date, DateParseError, RecordId, StatusFilter, TransactionKind, TransactionRecord,
    TransactionStatus,
};
