use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::{
    aggregation::{
        group_by_category, rank_categories, ratio, summarize_credits, summarize_totals,
        CategoryTotal, CreditSummary, Totals,
    },
    diagnostics::{Screened, SkippedRecord},
    filters::{filter_by_interval, filter_by_property, filter_by_status},
    series::{build_monthly_series, MonthlyBucket},
};
use crate::ledger::{
    resolve_period_with, Interval, PeriodBoundary, PeriodKind, StatusFilter, TransactionKind,
    TransactionRecord,
};

/// Parameters a financial widget chooses before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSelection {
    pub period: PeriodKind,
    pub status: StatusFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(default)]
    pub boundary: PeriodBoundary,
}

impl WidgetSelection {
    pub fn new(period: PeriodKind, status: StatusFilter) -> Self {
        Self {
            period,
            status,
            ..Self::default()
        }
    }

    pub fn with_property(mut self, property_id: impl Into<String>) -> Self {
        self.property_id = Some(property_id.into());
        self
    }

    pub fn with_boundary(mut self, boundary: PeriodBoundary) -> Self {
        self.boundary = boundary;
        self
    }
}

/// Everything the overview widgets display for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub selection: WidgetSelection,
    pub interval: Interval,
    pub totals: Totals,
    /// Income over expenses; infinite when only income exists.
    pub income_expense_ratio: f64,
    /// Credit obligations of the property scope, independent of period and status.
    pub credit: CreditSummary,
    pub income_by_category: Vec<CategoryTotal>,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub skipped: Vec<SkippedRecord>,
}

pub struct DashboardService;

impl DashboardService {
    /// Applies property, status and period scoping in that order.
    pub fn scope<'a>(
        records: &'a [TransactionRecord],
        selection: &WidgetSelection,
        now: NaiveDateTime,
    ) -> Screened<Vec<&'a TransactionRecord>> {
        let interval = resolve_period_with(selection.period, now, selection.boundary);
        let by_status = filter_by_status(
            Self::property_scope(records, selection),
            &selection.status,
        );
        filter_by_interval(by_status, &interval)
    }

    pub fn summarize(
        records: &[TransactionRecord],
        selection: &WidgetSelection,
        now: NaiveDateTime,
    ) -> DashboardSummary {
        let interval = resolve_period_with(selection.period, now, selection.boundary);
        let (scoped, skipped) = Self::scope(records, selection, now).into_parts();

        let totals = summarize_totals(scoped.iter().copied());
        let income_by_category = rank_categories(&group_by_category(
            scoped.iter().copied(),
            &TransactionKind::Income,
        ));
        let expenses_by_category = rank_categories(&group_by_category(
            scoped.iter().copied(),
            &TransactionKind::Expense,
        ));
        let credit = summarize_credits(Self::property_scope(records, selection));

        tracing::debug!(
            period = %selection.period,
            status = %selection.status,
            records = totals.count,
            skipped = skipped.len(),
            "summarized dashboard selection"
        );

        DashboardSummary {
            selection: selection.clone(),
            interval,
            income_expense_ratio: ratio(totals.income, totals.expenses),
            totals,
            credit,
            income_by_category,
            expenses_by_category,
            skipped,
        }
    }

    /// Monthly evolution for the selection's property and status. The period is
    /// ignored: the window is `months` long and ends at `anchor`.
    pub fn trend(
        records: &[TransactionRecord],
        selection: &WidgetSelection,
        months: u32,
        anchor: NaiveDateTime,
    ) -> Screened<Vec<MonthlyBucket>> {
        let scoped = filter_by_status(
            Self::property_scope(records, selection),
            &selection.status,
        );
        build_monthly_series(scoped, months, anchor)
    }

    pub fn category_breakdown(
        records: &[TransactionRecord],
        selection: &WidgetSelection,
        kind: &TransactionKind,
        now: NaiveDateTime,
    ) -> Screened<Vec<CategoryTotal>> {
        Self::scope(records, selection, now)
            .map(|scoped| rank_categories(&group_by_category(scoped, kind)))
    }

    pub fn credit_overview(
        records: &[TransactionRecord],
        selection: &WidgetSelection,
    ) -> CreditSummary {
        summarize_credits(Self::property_scope(records, selection))
    }

    fn property_scope<'a>(
        records: &'a [TransactionRecord],
        selection: &WidgetSelection,
    ) -> Vec<&'a TransactionRecord> {
        match selection.property_id.as_deref() {
            Some(property_id) => filter_by_property(records, property_id),
            None => records.iter().collect(),
        }
    }
}
