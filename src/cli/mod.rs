//! Hand-parsed command line front end over the dashboard service.

pub mod output;

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use strsim::levenshtein;

use crate::{
    config::{Config, MAX_SERIES_MONTHS},
    core::{cumulative_balance, services::DashboardService, services::WidgetSelection},
    errors::{EstateError, Result},
    ledger::{
        parse_record_date, resolve_period_with, PeriodBoundary, PeriodKind, StatusFilter,
        TransactionKind, TransactionRecord,
    },
    source::{DataSource, JsonFileSource, SourceQuery},
    utils::build_info,
};

use output::Presentation;

const SUGGESTION_DISTANCE: usize = 3;

// Extra spellings worth suggesting besides the canonical names.
const PERIOD_ALIASES: [&str; 6] = ["month", "quarter", "year", "1m", "3m", "12m"];

/// Source of the current time. Only the CLI reads the system clock.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Options shared by the report commands. Unset values fall back to the config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportArgs {
    pub file: Option<PathBuf>,
    pub period: Option<PeriodKind>,
    pub status: Option<StatusFilter>,
    pub property: Option<String>,
    pub now: Option<NaiveDateTime>,
    pub boundary: Option<PeriodBoundary>,
    pub months: Option<u32>,
    pub kind: Option<TransactionKind>,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Summary(ReportArgs),
    Trend(ReportArgs),
    Categories(ReportArgs),
    Version,
    Help,
}

impl Command {
    fn flags_for(name: &str) -> &'static [&'static str] {
        match name {
            "summary" => &["period", "status", "property", "now", "boundary", "json"],
            "trend" => &["months", "anchor", "status", "property", "json"],
            "categories" => &[
                "type", "period", "status", "property", "now", "boundary", "json",
            ],
            _ => &[],
        }
    }

    fn accepts(name: &str, flag: &str) -> bool {
        Self::flags_for(name).contains(&flag)
    }
}

pub fn usage() -> &'static str {
    "Usage: estate_core_cli <command>\n\
     Commands:\n  \
     summary <file.json> [--period P] [--status S] [--property ID] [--now DATE] [--boundary end|now] [--json]\n  \
     trend <file.json> [--months N] [--anchor DATE] [--status S] [--property ID] [--json]\n  \
     categories <file.json> [--type income|expense|credit] [--period P] [--status S] [--property ID] [--now DATE] [--boundary end|now] [--json]\n  \
     version"
}

pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let name = match args.next() {
        Some(name) => name.to_lowercase(),
        None => return Ok(Command::Help),
    };
    match name.as_str() {
        "version" | "--version" | "-v" => return Ok(Command::Version),
        "help" | "--help" | "-h" => return Ok(Command::Help),
        "summary" | "trend" | "categories" => {}
        other => {
            return Err(EstateError::InvalidInput(format!(
                "unknown command `{other}`"
            )))
        }
    }

    let mut report = ReportArgs::default();
    while let Some(token) = args.next() {
        let Some(flag) = token.strip_prefix("--") else {
            if report.file.is_some() {
                return Err(EstateError::InvalidInput(format!(
                    "unexpected argument `{token}`"
                )));
            }
            report.file = Some(PathBuf::from(token));
            continue;
        };
        let (flag, inline) = match flag.split_once('=') {
            Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
            None => (flag.to_string(), None),
        };
        if !Command::accepts(&name, &flag) {
            return Err(EstateError::InvalidInput(format!(
                "`{name}` does not accept --{flag}"
            )));
        }
        if flag == "json" {
            report.json = true;
            continue;
        }
        let value = match inline.or_else(|| args.next()) {
            Some(value) => value,
            None => {
                return Err(EstateError::InvalidInput(format!(
                    "--{flag} expects a value"
                )))
            }
        };
        match flag.as_str() {
            "period" => report.period = Some(parse_period(&value)?),
            "status" => report.status = Some(value.parse()?),
            "property" => report.property = Some(value),
            "now" | "anchor" => report.now = Some(parse_moment(&value)?),
            "boundary" => report.boundary = Some(value.parse()?),
            "type" => report.kind = Some(value.parse()?),
            "months" => {
                let months = value.parse::<u32>().map_err(|_| {
                    EstateError::InvalidInput(format!("--months expects a number, got `{value}`"))
                })?;
                if !(1..=MAX_SERIES_MONTHS).contains(&months) {
                    return Err(EstateError::InvalidInput(format!(
                        "--months must be between 1 and {MAX_SERIES_MONTHS}, got {months}"
                    )));
                }
                report.months = Some(months);
            }
            other => {
                return Err(EstateError::InvalidInput(format!("unknown flag --{other}")))
            }
        }
    }

    Ok(match name.as_str() {
        "summary" => Command::Summary(report),
        "trend" => Command::Trend(report),
        _ => Command::Categories(report),
    })
}

/// Parses a period name, suggesting the closest known name on failure.
pub fn parse_period(raw: &str) -> Result<PeriodKind> {
    raw.parse().map_err(|err| match suggest_period(raw) {
        Some(best) => EstateError::InvalidInput(format!("{err}. Did you mean `{best}`?")),
        None => err,
    })
}

pub fn suggest_period(input: &str) -> Option<&'static str> {
    let needle = input.to_lowercase();
    PeriodKind::VARIANTS
        .iter()
        .map(|period| period.as_str())
        .chain(PERIOD_ALIASES)
        .map(|candidate| (levenshtein(&candidate.to_lowercase(), &needle), candidate))
        .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

fn parse_moment(raw: &str) -> Result<NaiveDateTime> {
    parse_record_date(raw).map_err(|err| EstateError::InvalidInput(err.to_string()))
}

fn load_records(
    report: &ReportArgs,
    config: &Config,
    now: NaiveDateTime,
) -> Result<Vec<TransactionRecord>> {
    let file = report
        .file
        .clone()
        .or_else(|| config.data_file.clone())
        .ok_or_else(|| EstateError::InvalidInput("missing transaction file".into()))?;
    let query = report
        .property
        .clone()
        .map(SourceQuery::for_property)
        .unwrap_or_default();
    let mut source =
        DataSource::new(JsonFileSource::new(file), config.stale_after()).with_query(query);
    source.refetch(now);
    source.into_result()
}

fn selection(report: &ReportArgs, config: &Config) -> WidgetSelection {
    WidgetSelection::new(
        report.period.unwrap_or(config.default_period),
        report
            .status
            .clone()
            .unwrap_or_else(|| config.default_status.clone()),
    )
    .with_boundary(report.boundary.unwrap_or(config.period_boundary))
}

/// Runs a parsed command and returns the text to print on stdout.
pub fn execute(command: &Command, config: &Config, clock: &dyn Clock) -> Result<String> {
    let view = Presentation::from_config(config);
    match command {
        Command::Help => Ok(usage().to_string()),
        Command::Version => Ok(output::render_version(&build_info::current())),
        Command::Summary(report) => {
            let now = report.now.unwrap_or_else(|| clock.now());
            let records = load_records(report, config, now)?;
            let summary = DashboardService::summarize(&records, &selection(report, config), now);
            if report.json {
                return Ok(serde_json::to_string_pretty(&summary)?);
            }
            Ok(output::render_summary(&summary, &view))
        }
        Command::Trend(report) => {
            let anchor = report.now.unwrap_or_else(|| clock.now());
            let months = report.months.unwrap_or(config.series_months);
            let records = load_records(report, config, anchor)?;
            let series =
                DashboardService::trend(&records, &selection(report, config), months, anchor);
            if report.json {
                return Ok(serde_json::to_string_pretty(&series)?);
            }
            let cumulative = cumulative_balance(&series.value);
            let mut text = output::render_trend(&series.value, &cumulative, &view);
            if let Some(skipped) = output::render_skipped(&series.skipped) {
                text.push('\n');
                text.push_str(&skipped);
            }
            Ok(text)
        }
        Command::Categories(report) => {
            let now = report.now.unwrap_or_else(|| clock.now());
            let kind = report.kind.clone().unwrap_or(TransactionKind::Expense);
            let records = load_records(report, config, now)?;
            let widget = selection(report, config);
            let breakdown = DashboardService::category_breakdown(&records, &widget, &kind, now);
            if report.json {
                return Ok(serde_json::to_string_pretty(&breakdown)?);
            }
            let interval = resolve_period_with(widget.period, now, widget.boundary);
            let mut text = output::render_categories(&kind, &interval, &breakdown.value, &view);
            if let Some(skipped) = output::render_skipped(&breakdown.skipped) {
                text.push('\n');
                text.push_str(&skipped);
            }
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    fn may_10() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn parses_summary_flags() {
        let command = parse_args([
            "summary",
            "tx.json",
            "--period",
            "this-quarter",
            "--status=completed",
            "--now",
            "2024-05-10",
            "--json",
        ])
        .unwrap();
        let Command::Summary(report) = command else {
            panic!("expected summary");
        };
        assert_eq!(report.file, Some(PathBuf::from("tx.json")));
        assert_eq!(report.period, Some(PeriodKind::ThisQuarter));
        assert_eq!(report.status.unwrap().as_str(), "completed");
        assert!(report.json);
    }

    #[test]
    fn rejects_flags_of_other_commands() {
        let err = parse_args(["trend", "tx.json", "--period", "all"]).unwrap_err();
        assert!(err.to_string().contains("does not accept --period"));
        assert!(parse_args(["summary", "--months"]).is_err());
        assert!(parse_args(["explode"]).is_err());
    }

    #[test]
    fn months_flag_is_bounded_like_the_config() {
        let command = parse_args(["trend", "tx.json", "--months", "120"]).unwrap();
        let Command::Trend(report) = command else {
            panic!("expected trend");
        };
        assert_eq!(report.months, Some(MAX_SERIES_MONTHS));

        for value in ["0", "121", "4294967295"] {
            let err = parse_args(["trend", "tx.json", "--months", value]).unwrap_err();
            assert!(matches!(err, EstateError::InvalidInput(_)), "{value}");
            assert!(err.to_string().contains("between 1 and 120"));
        }
    }

    #[test]
    fn usage_lists_every_accepted_flag() {
        let text = usage();
        for name in ["summary", "trend", "categories"] {
            let line = text
                .lines()
                .find(|line| line.trim_start().starts_with(name))
                .unwrap();
            for flag in Command::flags_for(name) {
                assert!(line.contains(&format!("--{flag}")), "{name} --{flag}");
            }
        }
    }

    #[test]
    fn misspelled_period_gets_a_suggestion() {
        let err = parse_period("thisQuater").unwrap_err();
        assert!(err.to_string().contains("Did you mean `thisQuarter`?"));
        assert!(matches!(
            parse_period("zzzzzzzzzzzz"),
            Err(EstateError::UnknownPeriod(_))
        ));
    }

    #[test]
    fn strict_type_flag() {
        assert!(matches!(
            parse_args(["categories", "tx.json", "--type", "refund"]),
            Err(EstateError::UnknownKind(_))
        ));
    }

    #[test]
    fn no_arguments_prints_help() {
        let command = parse_args(Vec::<String>::new()).unwrap();
        let text = execute(&command, &Config::default(), &FixedClock(may_10())).unwrap();
        assert!(text.starts_with("Usage: estate_core_cli"));
    }

    #[test]
    fn summary_requires_a_file() {
        let command = Command::Summary(ReportArgs::default());
        let err = execute(&command, &Config::default(), &FixedClock(may_10())).unwrap_err();
        assert!(err.to_string().contains("missing transaction file"));
    }

    #[test]
    fn summary_over_a_fixture_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tx.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 1, "type": "income", "amount": 1000, "date": "2024-05-01", "category": "rent"},
                {"id": 2, "type": "expense", "amount": "250.5", "date": "2024-05-03"},
                {"id": 3, "type": "income", "amount": 400, "date": "2024-04-20"}
            ]"#,
        )
        .unwrap();
        let config = Config {
            locale: "en-US".into(),
            ..Config::default()
        };
        let command = Command::Summary(ReportArgs {
            file: Some(path),
            ..ReportArgs::default()
        });
        let text = execute(&command, &config, &FixedClock(may_10())).unwrap();
        assert!(text.contains("€1,000.00"));
        assert!(text.contains("€250.50"));
        assert!(text.contains("€749.50"));
        assert!(text.contains("Rent"));
    }
}
