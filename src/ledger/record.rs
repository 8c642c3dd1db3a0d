use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use super::calendar::start_of_day;
use super::category::normalize_category;
use crate::errors::{EstateError, Result};

/// Backend identifier; the API emits either numeric or string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(value) => write!(f, "{value}"),
            RecordId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

/// Which aggregate bucket a record feeds. Unknown codes are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
    Credit,
    Other(String),
}

impl TransactionKind {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "income" => TransactionKind::Income,
            "expense" => TransactionKind::Expense,
            "credit" => TransactionKind::Credit,
            _ => TransactionKind::Other(code.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
            TransactionKind::Credit => "credit",
            TransactionKind::Other(code) => code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TransactionKind::Other(_))
    }
}

impl Default for TransactionKind {
    fn default() -> Self {
        TransactionKind::Other(String::new())
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse for user input; records use the lenient `from_code`.
impl FromStr for TransactionKind {
    type Err = EstateError;

    fn from_str(raw: &str) -> Result<Self> {
        match TransactionKind::from_code(raw) {
            TransactionKind::Other(code) => Err(EstateError::UnknownKind(code)),
            kind => Ok(kind),
        }
    }
}

impl Serialize for TransactionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = Option::<String>::deserialize(deserializer)?;
        Ok(code
            .map(|code| TransactionKind::from_code(&code))
            .unwrap_or_default())
    }
}

/// Open status enumeration; credits additionally use `active` and `cancelled`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Active,
    Cancelled,
    Other(String),
}

impl TransactionStatus {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "pending" => TransactionStatus::Pending,
            "completed" => TransactionStatus::Completed,
            "active" => TransactionStatus::Active,
            "cancelled" | "canceled" => TransactionStatus::Cancelled,
            _ => TransactionStatus::Other(code.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Active => "active",
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Other(code) => code,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TransactionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = Option::<String>::deserialize(deserializer)?;
        Ok(code
            .map(|code| TransactionStatus::from_code(&code))
            .unwrap_or_default())
    }
}

/// Status selection made by a widget. `All` leaves the collection untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TransactionStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: &TransactionStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => expected == status,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = EstateError;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "*" || trimmed.eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            Ok(StatusFilter::Only(TransactionStatus::from_code(trimmed)))
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.as_deref()
            .unwrap_or("all")
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date `{input}`")]
pub struct DateParseError {
    pub input: String,
}

/// One financial event as served by the property-management backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: RecordId,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    /// Raw ISO-8601 value; see [`TransactionRecord::parsed_date`].
    #[serde(default, deserialize_with = "nullable_string")]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub monthly_payment: Option<f64>,
}

impl TransactionRecord {
    pub fn new(
        id: impl Into<RecordId>,
        kind: TransactionKind,
        amount: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            status: TransactionStatus::default(),
            amount,
            date: date.into(),
            category: None,
            description: None,
            property_id: None,
            property_name: None,
            payment_method: None,
            monthly_payment: None,
        }
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_property(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.property_id = Some(id.into());
        self.property_name = Some(name.into());
        self
    }

    pub fn with_monthly_payment(mut self, amount: f64) -> Self {
        self.monthly_payment = Some(amount);
        self
    }

    pub fn parsed_date(&self) -> std::result::Result<NaiveDateTime, DateParseError> {
        parse_record_date(&self.date)
    }

    /// Category code with blanks folded into `uncategorized`.
    pub fn category_code(&self) -> &str {
        normalize_category(self.category.as_deref())
    }
}

const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses the date shapes the backend emits. Offsets are dropped after
/// parsing so the wall-clock time written by the backend is what gets bucketed.
pub fn parse_record_date(raw: &str) -> std::result::Result<NaiveDateTime, DateParseError> {
    let input = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        return Ok(with_offset.naive_local());
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(parsed);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(start_of_day)
        .map_err(|_| DateParseError {
            input: raw.to_string(),
        })
}

fn nullable_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn amount_from_value(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount.filter(|amount| amount.is_finite())
}

fn lenient_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<f64, D::Error> {
    Ok(lenient_optional_amount(deserializer)?.unwrap_or(0.0))
}

fn lenient_optional_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(amount_from_value))
}
