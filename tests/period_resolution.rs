use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use estate_core::ledger::{
    quarter_bounds, resolve_period, resolve_period_with, Interval, PeriodBoundary, PeriodKind,
};

fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn this_quarter_spans_april_through_june_in_may() {
    let now = at(2024, 5, 10, 0);
    assert_eq!(quarter_bounds(&now), (4, 6));

    let Interval::Window(window) = resolve_period(PeriodKind::ThisQuarter, now) else {
        panic!("quarter must resolve to a window");
    };
    assert_eq!(window.start, at(2024, 4, 1, 0));
    assert_eq!(window.end.date(), date(2024, 6, 30));
    assert!(window.contains(at(2024, 6, 30, 23)));
    assert!(!window.contains(at(2024, 7, 1, 0)));
}

#[test]
fn calendar_periods_can_stop_at_now() {
    let now = at(2024, 5, 10, 15);
    let window = resolve_period_with(PeriodKind::ThisYear, now, PeriodBoundary::Now);
    let window = window.window().unwrap();
    assert_eq!(window.start, at(2024, 1, 1, 0));
    assert_eq!(window.end, now);
}

#[test]
fn this_month_covers_the_whole_month() {
    let window = resolve_period(PeriodKind::ThisMonth, at(2024, 2, 14, 8));
    let window = window.window().unwrap();
    assert_eq!(window.start.date(), date(2024, 2, 1));
    assert_eq!(window.end.date(), date(2024, 2, 29));
    assert_eq!(window.end.hour(), 23);
}

#[test]
fn rolling_windows_clamp_the_day() {
    let now = at(2024, 3, 31, 18);
    let month = resolve_period(PeriodKind::LastMonth, now);
    let month = month.window().unwrap();
    assert_eq!(month.start, at(2024, 2, 29, 18));
    assert_eq!(month.end, now);

    let year = resolve_period(PeriodKind::LastYear, at(2024, 2, 29, 9));
    assert_eq!(year.window().unwrap().start, at(2023, 2, 28, 9));
}

#[test]
fn quarters_never_cross_a_year() {
    for month in 1..=12 {
        let now = at(2023, month, 15, 12);
        let (start, end) = quarter_bounds(&now);
        assert_eq!(end - start, 2);
        assert!(start <= month && month <= end);
        let window = resolve_period(PeriodKind::ThisQuarter, now);
        let window = window.window().unwrap();
        assert_eq!(window.start.year(), 2023);
        assert_eq!(window.end.year(), 2023);
    }
}

#[test]
fn all_time_has_no_bounds() {
    let interval = resolve_period(PeriodKind::All, at(2024, 5, 10, 0));
    assert!(interval.is_all());
    assert!(interval.contains(at(1970, 1, 1, 0)));
}
