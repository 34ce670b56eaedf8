//! Period aggregation
//!
//! Groups expense records into a weekly or monthly window and computes
//! per-category totals, the overall total, the record count, and the
//! daily average. Snapshots are derived values; they are never persisted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{BudgetScope, Category, ExpenseRecord, Money, PeriodKind, PeriodWindow};

/// Per-window spending aggregate
///
/// Categories with zero spend are omitted from `by_category`; rankings and
/// budget lookups treat missing entries as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    /// The window the records were bucketed into
    pub window: PeriodWindow,

    /// The kind of window
    pub kind: PeriodKind,

    /// Total spent per category with at least one record in the window
    pub by_category: BTreeMap<Category, Money>,

    /// Total across all categories
    pub overall_total: Money,

    /// Number of records in the window
    pub record_count: usize,

    /// overall_total / elapsed days, rounded half up
    pub daily_average: Money,
}

impl AggregateSnapshot {
    /// Aggregate records into the window containing the reference date
    ///
    /// An empty record collection yields a zeroed snapshot, not a failure.
    pub fn compute(
        records: &[ExpenseRecord],
        kind: PeriodKind,
        reference: NaiveDate,
    ) -> Self {
        let window = PeriodWindow::containing(kind, reference);
        Self::compute_for_window(records, kind, window, reference)
    }

    /// Aggregate records into the window containing the reference date and
    /// the immediately preceding window of the same kind
    pub fn compute_with_previous(
        records: &[ExpenseRecord],
        kind: PeriodKind,
        reference: NaiveDate,
    ) -> (Self, Self) {
        let window = PeriodWindow::containing(kind, reference);
        let prev_window = window.prev(kind);

        let current = Self::compute_for_window(records, kind, window, reference);
        // The previous window is fully elapsed; average over its whole span
        let previous = Self::compute_for_window(
            records,
            kind,
            prev_window,
            prev_window.end - chrono::Duration::days(1),
        );

        (current, previous)
    }

    fn compute_for_window(
        records: &[ExpenseRecord],
        kind: PeriodKind,
        window: PeriodWindow,
        reference: NaiveDate,
    ) -> Self {
        let mut by_category: BTreeMap<Category, Money> = BTreeMap::new();
        let mut overall_total = Money::zero();
        let mut record_count = 0;

        for record in records.iter().filter(|r| window.contains(r.date)) {
            *by_category.entry(record.category).or_insert_with(Money::zero) +=
                record.amount;
            overall_total += record.amount;
            record_count += 1;
        }

        let daily_average = overall_total.div_round(window.elapsed_days(reference));

        Self {
            window,
            kind,
            by_category,
            overall_total,
            record_count,
            daily_average,
        }
    }

    /// Total spent within a budget scope (zero if the category is absent)
    pub fn spent_in(&self, scope: &BudgetScope) -> Money {
        match scope {
            BudgetScope::Overall => self.overall_total,
            BudgetScope::Category(category) => self
                .by_category
                .get(category)
                .copied()
                .unwrap_or_else(Money::zero),
        }
    }

    /// Mean record amount for a category within the window, zero if none
    pub fn category_mean(&self, category: Category, records: &[ExpenseRecord]) -> Money {
        let count = records
            .iter()
            .filter(|r| r.category == category && self.window.contains(r.date))
            .count() as i64;
        self.by_category
            .get(&category)
            .copied()
            .unwrap_or_else(Money::zero)
            .div_round(count)
    }

    /// Top N categories by total, descending
    ///
    /// Ties are broken by the fixed category enumeration order, so the
    /// ranking is stable and deterministic across runs.
    pub fn top_categories(&self, n: usize) -> Vec<(Category, Money)> {
        let mut ranked: Vec<(Category, Money)> = self
            .by_category
            .iter()
            .map(|(category, total)| (*category, *total))
            .collect();

        // BTreeMap iteration already follows enumeration order, so a stable
        // sort by descending total preserves it for equal totals.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}
