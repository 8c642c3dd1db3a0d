//! Named reporting periods and their resolution into concrete date windows.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::calendar::{end_of_day, shift_month, start_of_day, MonthKey};
use crate::errors::{EstateError, Result};

/// Reporting periods offered by the financial widgets.
///
/// `This*` variants are aligned on the calendar unit containing `now`;
/// `Last*` variants are rolling windows ending at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PeriodKind {
    #[default]
    ThisMonth,
    ThisQuarter,
    ThisYear,
    LastMonth,
    LastQuarter,
    LastYear,
    All,
}

impl PeriodKind {
    pub const VARIANTS: [PeriodKind; 7] = [
        PeriodKind::ThisMonth,
        PeriodKind::ThisQuarter,
        PeriodKind::ThisYear,
        PeriodKind::LastMonth,
        PeriodKind::LastQuarter,
        PeriodKind::LastYear,
        PeriodKind::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PeriodKind::ThisMonth => "thisMonth",
            PeriodKind::ThisQuarter => "thisQuarter",
            PeriodKind::ThisYear => "thisYear",
            PeriodKind::LastMonth => "lastMonth",
            PeriodKind::LastQuarter => "lastQuarter",
            PeriodKind::LastYear => "lastYear",
            PeriodKind::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PeriodKind::ThisMonth => "This month",
            PeriodKind::ThisQuarter => "This quarter",
            PeriodKind::ThisYear => "This year",
            PeriodKind::LastMonth => "Last month",
            PeriodKind::LastQuarter => "Last 3 months",
            PeriodKind::LastYear => "Last 12 months",
            PeriodKind::All => "All time",
        }
    }

    fn rolling_months(self) -> Option<i32> {
        match self {
            PeriodKind::LastMonth => Some(1),
            PeriodKind::LastQuarter => Some(3),
            PeriodKind::LastYear => Some(12),
            _ => None,
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodKind {
    type Err = EstateError;

    fn from_str(raw: &str) -> Result<Self> {
        let key: String = raw
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let period = match key.as_str() {
            "thismonth" | "month" | "currentmonth" => PeriodKind::ThisMonth,
            "thisquarter" | "quarter" | "currentquarter" => PeriodKind::ThisQuarter,
            "thisyear" | "year" | "currentyear" | "ytd" => PeriodKind::ThisYear,
            "lastmonth" | "1m" => PeriodKind::LastMonth,
            "lastquarter" | "3m" | "last3months" => PeriodKind::LastQuarter,
            "lastyear" | "12m" | "last12months" => PeriodKind::LastYear,
            "all" | "alltime" => PeriodKind::All,
            _ => return Err(EstateError::UnknownPeriod(raw.to_string())),
        };
        Ok(period)
    }
}

/// Where calendar-aligned periods stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PeriodBoundary {
    /// Through the last instant of the month/quarter/year.
    #[default]
    EndOfUnit,
    /// Through `now`.
    Now,
}

impl FromStr for PeriodBoundary {
    type Err = EstateError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "end" | "endofunit" | "end-of-unit" => Ok(PeriodBoundary::EndOfUnit),
            "now" => Ok(PeriodBoundary::Now),
            other => Err(EstateError::InvalidInput(format!(
                "unknown period boundary `{other}` (expected `end` or `now`)"
            ))),
        }
    }
}

/// Inclusive date-time window; both `start` and `end` belong to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < start {
            return Err(EstateError::InvalidInput(format!(
                "window end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }
}

/// A resolved period: either unconstrained or a concrete window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Interval {
    All,
    Window(DateWindow),
}

impl Interval {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        match self {
            Interval::All => true,
            Interval::Window(window) => window.contains(at),
        }
    }

    pub fn window(&self) -> Option<&DateWindow> {
        match self {
            Interval::All => None,
            Interval::Window(window) => Some(window),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Interval::All)
    }
}

/// First and last month (1-based) of the calendar quarter containing `date`.
pub fn quarter_bounds<D: Datelike>(date: &D) -> (u32, u32) {
    let quarter_index = date.month0() / 3;
    let start = quarter_index * 3;
    (start + 1, start + 3)
}

/// Resolves `period` relative to `now`, calendar periods running to the end of
/// their unit.
pub fn resolve_period(period: PeriodKind, now: NaiveDateTime) -> Interval {
    resolve_period_with(period, now, PeriodBoundary::default())
}

pub fn resolve_period_with(
    period: PeriodKind,
    now: NaiveDateTime,
    boundary: PeriodBoundary,
) -> Interval {
    let current = MonthKey::of(&now);
    let window = match period {
        PeriodKind::All => return Interval::All,
        PeriodKind::ThisMonth => calendar_window(current, current, now, boundary),
        PeriodKind::ThisQuarter => {
            let (first, last) = quarter_bounds(&now);
            calendar_window(
                MonthKey {
                    year: current.year,
                    month: first,
                },
                MonthKey {
                    year: current.year,
                    month: last,
                },
                now,
                boundary,
            )
        }
        PeriodKind::ThisYear => calendar_window(
            MonthKey {
                year: current.year,
                month: 1,
            },
            MonthKey {
                year: current.year,
                month: 12,
            },
            now,
            boundary,
        ),
        PeriodKind::LastMonth | PeriodKind::LastQuarter | PeriodKind::LastYear => {
            let months = period.rolling_months().unwrap_or(1);
            let start = shift_month(now.date(), -months).and_time(now.time());
            DateWindow { start, end: now }
        }
    };
    Interval::Window(window)
}

fn calendar_window(
    first: MonthKey,
    last: MonthKey,
    now: NaiveDateTime,
    boundary: PeriodBoundary,
) -> DateWindow {
    let start = start_of_day(first.first_day());
    let end = match boundary {
        PeriodBoundary::EndOfUnit => end_of_day(last.last_day()),
        PeriodBoundary::Now => now.max(start),
    };
    DateWindow { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn window(interval: Interval) -> DateWindow {
        *interval.window().expect("bounded interval")
    }

    #[test]
    fn quarter_bounds_follow_month_index() {
        assert_eq!(quarter_bounds(&at(2024, 5, 10)), (4, 6));
        assert_eq!(quarter_bounds(&at(2024, 1, 1)), (1, 3));
        assert_eq!(quarter_bounds(&at(2024, 12, 31)), (10, 12));
    }

    #[test]
    fn this_quarter_spans_whole_quarter() {
        let w = window(resolve_period(PeriodKind::ThisQuarter, at(2024, 5, 10)));
        assert_eq!(w.start, start_of_day(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert_eq!(w.end.date(), NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn this_month_can_stop_at_now() {
        let now = at(2024, 2, 10);
        let w = window(resolve_period_with(
            PeriodKind::ThisMonth,
            now,
            PeriodBoundary::Now,
        ));
        assert_eq!(w.start.date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(w.end, now);
    }

    #[test]
    fn rolling_windows_end_at_now() {
        let now = at(2024, 3, 31);
        let w = window(resolve_period(PeriodKind::LastMonth, now));
        assert_eq!(w.start, at(2024, 2, 29));
        assert_eq!(w.end, now);

        let w = window(resolve_period(PeriodKind::LastYear, now));
        assert_eq!(w.start, at(2023, 3, 31));
    }

    #[test]
    fn all_has_no_window() {
        assert!(resolve_period(PeriodKind::All, at(2024, 1, 1)).is_all());
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let w = DateWindow::new(at(2024, 1, 1), at(2024, 1, 31)).unwrap();
        assert!(w.contains(at(2024, 1, 1)));
        assert!(w.contains(at(2024, 1, 31)));
        assert!(!w.contains(at(2024, 2, 1)));
        assert!(DateWindow::new(at(2024, 2, 1), at(2024, 1, 1)).is_err());
    }

    #[test]
    fn parses_widget_spellings() {
        assert_eq!("thisMonth".parse::<PeriodKind>().unwrap(), PeriodKind::ThisMonth);
        assert_eq!("last-quarter".parse::<PeriodKind>().unwrap(), PeriodKind::LastQuarter);
        assert_eq!("LAST_YEAR".parse::<PeriodKind>().unwrap(), PeriodKind::LastYear);
        assert_eq!("12m".parse::<PeriodKind>().unwrap(), PeriodKind::LastYear);
        assert_eq!("all-time".parse::<PeriodKind>().unwrap(), PeriodKind::All);
        assert!(matches!(
            "fortnight".parse::<PeriodKind>(),
            Err(EstateError::UnknownPeriod(_))
        ));
        for period in PeriodKind::VARIANTS {
            assert_eq!(period.as_str().parse::<PeriodKind>().unwrap(), period);
        }
    }

    #[test]
    fn parses_boundary_names() {
        assert_eq!("now".parse::<PeriodBoundary>().unwrap(), PeriodBoundary::Now);
        assert_eq!("End".parse::<PeriodBoundary>().unwrap(), PeriodBoundary::EndOfUnit);
        assert!("later".parse::<PeriodBoundary>().is_err());
    }
}
