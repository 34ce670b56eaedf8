//! Spending insights
//!
//! Consumes the current aggregate snapshot, a short history of prior
//! snapshots, and the current period's raw records, and derives anomaly
//! flags, cost-saving suggestions, and trend classification. Every
//! threshold is a named, overridable parameter on [`InsightConfig`].

use serde::{Deserialize, Serialize};

use crate::models::{Category, ExpenseRecord, Money, RecordId};

use super::aggregate::AggregateSnapshot;

/// Tunable thresholds for insight detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Current total must exceed this multiple of the historical mean to
    /// count as an anomaly
    pub anomaly_ratio: f64,

    /// Share of overall spending above which a category is called out
    pub high_share_ratio: f64,

    /// Records below this amount count as small expenses
    pub small_expense_cutoff: Money,

    /// More than this many small records in a category triggers a
    /// consolidation suggestion
    pub small_expense_count: usize,

    /// A record above this multiple of its category's period mean is
    /// flagged individually
    pub large_multiple: f64,

    /// Tolerance band (fraction of the previous total) within which the
    /// trend counts as stable
    pub trend_tolerance: f64,

    /// Suggested reduction fraction for the savings hint
    pub savings_fraction: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            anomaly_ratio: 1.2,
            high_share_ratio: 0.30,
            small_expense_cutoff: Money::from_cents(1000),
            small_expense_count: 10,
            large_multiple: 2.0,
            trend_tolerance: 0.10,
            savings_fraction: 0.10,
        }
    }
}

/// Overall spending is unusually high relative to history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFlag {
    pub current_total: Money,
    pub historical_mean: Money,
}

/// A category taking an outsized share of the period's spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighSpendCategory {
    pub category: Category,
    pub amount: Money,
    /// Fraction of the overall total
    pub share: f64,
}

/// Many small purchases in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentSmallExpenses {
    pub category: Category,
    pub count: usize,
    /// Mean amount of the small records, rounded half up
    pub average: Money,
}

/// A single record far above its category's period mean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargeTransaction {
    pub record_id: RecordId,
    pub category: Category,
    pub amount: Money,
    pub category_mean: Money,
}

/// Direction of spending relative to the previous period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Signed change between the current and previous period totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub current_total: Money,
    pub previous_total: Money,
    /// current minus previous (signed)
    pub change: Money,
    /// Percentage change; `None` when the previous total is zero
    pub change_pct: Option<f64>,
}

/// Estimated saving from trimming the top category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsHint {
    pub category: Category,
    pub current_spending: Money,
    pub potential_savings: Money,
}

/// All derived insights for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingInsights {
    /// Set when the current total is anomalously high; absent with no history
    pub anomaly: Option<AnomalyFlag>,

    /// Categories above the share threshold, descending by amount
    pub high_spend: Vec<HighSpendCategory>,

    /// Consolidation suggestions for frequent small purchases
    pub frequent_small: Vec<FrequentSmallExpenses>,

    /// Individually flagged outlier records
    pub large_transactions: Vec<LargeTransaction>,

    /// Trend vs the immediately preceding period; absent with no history
    pub trend: Option<TrendDirection>,

    /// Delta vs the immediately preceding period; absent with no history
    pub comparison: Option<PeriodComparison>,

    /// Reduction estimate for the top spending category
    pub savings_hint: Option<SavingsHint>,
}

impl SpendingInsights {
    /// Derive insights for the current period
    ///
    /// `history` holds prior snapshots of the same period kind, oldest
    /// first; the last entry is the immediately preceding period. Empty
    /// history suppresses the anomaly flag, trend, and comparison rather
    /// than failing.
    pub fn detect(
        current: &AggregateSnapshot,
        history: &[AggregateSnapshot],
        records: &[ExpenseRecord],
        config: &InsightConfig,
    ) -> Self {
        Self {
            anomaly: detect_anomaly(current, history, config),
            high_spend: detect_high_spend(current, config),
            frequent_small: detect_frequent_small(current, records, config),
            large_transactions: detect_large_transactions(current, records, config),
            trend: history
                .last()
                .map(|prev| classify_trend(current.overall_total, prev.overall_total, config)),
            comparison: history.last().map(|prev| compare_periods(current, prev)),
            savings_hint: detect_savings_hint(current, config),
        }
    }
}

fn detect_anomaly(
    current: &AggregateSnapshot,
    history: &[AggregateSnapshot],
    config: &InsightConfig,
) -> Option<AnomalyFlag> {
    if history.is_empty() {
        return None;
    }

    let total: Money = history.iter().map(|s| s.overall_total).sum();
    let mean = total.div_round(history.len() as i64);

    if current.overall_total > mean.scale(config.anomaly_ratio) {
        Some(AnomalyFlag {
            current_total: current.overall_total,
            historical_mean: mean,
        })
    } else {
        None
    }
}

fn detect_high_spend(
    current: &AggregateSnapshot,
    config: &InsightConfig,
) -> Vec<HighSpendCategory> {
    if !current.overall_total.is_positive() {
        return Vec::new();
    }

    let overall = current.overall_total.cents() as f64;
    let mut found: Vec<HighSpendCategory> = current
        .by_category
        .iter()
        .filter_map(|(category, amount)| {
            let share = amount.cents() as f64 / overall;
            (share > config.high_share_ratio).then_some(HighSpendCategory {
                category: *category,
                amount: *amount,
                share,
            })
        })
        .collect();

    // Descending by amount; map iteration order breaks ties deterministically
    found.sort_by(|a, b| b.amount.cmp(&a.amount));
    found
}

fn detect_frequent_small(
    current: &AggregateSnapshot,
    records: &[ExpenseRecord],
    config: &InsightConfig,
) -> Vec<FrequentSmallExpenses> {
    Category::ALL
        .iter()
        .filter_map(|category| {
            let small: Vec<Money> = records
                .iter()
                .filter(|r| {
                    r.category == *category
                        && current.window.contains(r.date)
                        && r.amount < config.small_expense_cutoff
                })
                .map(|r| r.amount)
                .collect();

            if small.len() <= config.small_expense_count {
                return None;
            }

            let total: Money = small.iter().copied().sum();
            Some(FrequentSmallExpenses {
                category: *category,
                count: small.len(),
                average: total.div_round(small.len() as i64),
            })
        })
        .collect()
}

fn detect_large_transactions(
    current: &AggregateSnapshot,
    records: &[ExpenseRecord],
    config: &InsightConfig,
) -> Vec<LargeTransaction> {
    records
        .iter()
        .filter(|r| current.window.contains(r.date))
        .filter_map(|record| {
            let mean = current.category_mean(record.category, records);
            if mean.is_positive() && record.amount > mean.scale(config.large_multiple) {
                Some(LargeTransaction {
                    record_id: record.id,
                    category: record.category,
                    amount: record.amount,
                    category_mean: mean,
                })
            } else {
                None
            }
        })
        .collect()
}

fn classify_trend(current: Money, previous: Money, config: &InsightConfig) -> TrendDirection {
    let upper = previous.scale(1.0 + config.trend_tolerance);
    let lower = previous.scale(1.0 - config.trend_tolerance);

    if current > upper {
        TrendDirection::Increasing
    } else if current < lower {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

fn compare_periods(
    current: &AggregateSnapshot,
    previous: &AggregateSnapshot,
) -> PeriodComparison {
    let change = current.overall_total - previous.overall_total;
    let change_pct = if previous.overall_total.is_positive() {
        Some(change.cents() as f64 / previous.overall_total.cents() as f64 * 100.0)
    } else {
        None
    };

    PeriodComparison {
        current_total: current.overall_total,
        previous_total: previous.overall_total,
        change,
        change_pct,
    }
}

fn detect_savings_hint(
    current: &AggregateSnapshot,
    config: &InsightConfig,
) -> Option<SavingsHint> {
    let (category, amount) = current.top_categories(1).into_iter().next()?;
    if !amount.is_positive() {
        return None;
    }

    Some(SavingsHint {
        category,
        current_spending: amount,
        potential_savings: amount.scale(config.savings_fraction),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PeriodKind;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, category: Category, cents: i64) -> ExpenseRecord {
        ExpenseRecord::new(date, category, Money::from_cents(cents)).unwrap()
    }

    fn monthly_snapshot(records: &[ExpenseRecord], reference: NaiveDate) -> AggregateSnapshot {
        AggregateSnapshot::compute(records, PeriodKind::Monthly, reference)
    }

    fn snapshot_with_total(month: u32, cents: i64) -> AggregateSnapshot {
        let records = vec![record(day(2025, month, 10), Category::Other, cents)];
        monthly_snapshot(&records, day(2025, month, 28))
    }

    #[test]
    fn test_anomaly_flagged_above_ratio() {
        // history means [800, 820, 810] -> mean 810; 1050 > 1.2 * 810 = 972
        let history = vec![
            snapshot_with_total(1, 80000),
            snapshot_with_total(2, 82000),
            snapshot_with_total(3, 81000),
        ];
        let records = vec![record(day(2025, 4, 10), Category::Other, 105000)];
        let current = monthly_snapshot(&records, day(2025, 4, 28));

        let insights =
            SpendingInsights::detect(&current, &history, &records, &InsightConfig::default());
        let anomaly = insights.anomaly.expect("anomaly expected");
        assert_eq!(anomaly.current_total.cents(), 105000);
        assert_eq!(anomaly.historical_mean.cents(), 81000);
    }

    #[test]
    fn test_anomaly_silent_without_history() {
        let records = vec![record(day(2025, 4, 10), Category::Other, 999999)];
        let current = monthly_snapshot(&records, day(2025, 4, 28));

        let insights =
            SpendingInsights::detect(&current, &[], &records, &InsightConfig::default());
        assert!(insights.anomaly.is_none());
        assert!(insights.trend.is_none());
        assert!(insights.comparison.is_none());
    }

    #[test]
    fn test_anomaly_not_flagged_within_ratio() {
        let history = vec![snapshot_with_total(3, 100000)];
        let records = vec![record(day(2025, 4, 10), Category::Other, 110000)];
        let current = monthly_snapshot(&records, day(2025, 4, 28));

        let insights =
            SpendingInsights::detect(&current, &history, &records, &InsightConfig::default());
        assert!(insights.anomaly.is_none());
    }

    #[test]
    fn test_high_spend_categories_ranked() {
        let records = vec![
            record(day(2025, 4, 5), Category::Rent, 50000),
            record(day(2025, 4, 6), Category::Groceries, 40000),
            record(day(2025, 4, 7), Category::Entertainment, 10000),
        ];
        let current = monthly_snapshot(&records, day(2025, 4, 28));

        let insights =
            SpendingInsights::detect(&current, &[], &records, &InsightConfig::default());
        // Rent 50% and Groceries 40% exceed the 30% share; Entertainment 10% does not
        assert_eq!(insights.high_spend.len(), 2);
        assert_eq!(insights.high_spend[0].category, Category::Rent);
        assert_eq!(insights.high_spend[1].category, Category::Groceries);
        assert!((insights.high_spend[0].share - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_high_spend_empty_period() {
        let current = monthly_snapshot(&[], day(2025, 4, 28));
        let insights =
            SpendingInsights::detect(&current, &[], &[], &InsightConfig::default());
        assert!(insights.high_spend.is_empty());
        assert!(insights.savings_hint.is_none());
    }

    #[test]
    fn test_frequent_small_expenses() {
        // Eleven coffees under the cutoff plus one large grocery run
        let mut records: Vec<ExpenseRecord> = (1..=11)
            .map(|d| record(day(2025, 4, d), Category::FoodAndDining, 450))
            .collect();
        records.push(record(day(2025, 4, 12), Category::Groceries, 12000));

        let current = monthly_snapshot(&records, day(2025, 4, 28));
        let insights =
            SpendingInsights::detect(&current, &[], &records, &InsightConfig::default());

        assert_eq!(insights.frequent_small.len(), 1);
        let suggestion = &insights.frequent_small[0];
        assert_eq!(suggestion.category, Category::FoodAndDining);
        assert_eq!(suggestion.count, 11);
        assert_eq!(suggestion.average.cents(), 450);
    }

    #[test]
    fn test_frequent_small_requires_count_above_threshold() {
        // Exactly ten small records is not enough
        let records: Vec<ExpenseRecord> = (1..=10)
            .map(|d| record(day(2025, 4, d), Category::FoodAndDining, 450))
            .collect();
        let current = monthly_snapshot(&records, day(2025, 4, 28));

        let insights =
            SpendingInsights::detect(&current, &[], &records, &InsightConfig::default());
        assert!(insights.frequent_small.is_empty());
    }

    #[test]
    fn test_large_transactions_flagged_individually() {
        // Shopping mean: (1000 + 1000 + 10000) / 3 = 4000; 10000 > 2 * 4000
        let records = vec![
            record(day(2025, 4, 1), Category::Shopping, 1000),
            record(day(2025, 4, 2), Category::Shopping, 1000),
            record(day(2025, 4, 3), Category::Shopping, 10000),
        ];
        let current = monthly_snapshot(&records, day(2025, 4, 28));

        let insights =
            SpendingInsights::detect(&current, &[], &records, &InsightConfig::default());
        assert_eq!(insights.large_transactions.len(), 1);

        let flagged = &insights.large_transactions[0];
        assert_eq!(flagged.record_id, records[2].id);
        assert_eq!(flagged.amount.cents(), 10000);
        assert_eq!(flagged.category_mean.cents(), 4000);
    }

    #[test]
    fn test_trend_classification() {
        let config = InsightConfig::default();
        let prev = Money::from_cents(100000);

        // +15% breaks the band, +5% stays inside it
        assert_eq!(
            classify_trend(Money::from_cents(115000), prev, &config),
            TrendDirection::Increasing
        );
        assert_eq!(
            classify_trend(Money::from_cents(105000), prev, &config),
            TrendDirection::Stable
        );
        assert_eq!(
            classify_trend(Money::from_cents(85000), prev, &config),
            TrendDirection::Decreasing
        );
        // Boundary values sit inside the band
        assert_eq!(
            classify_trend(Money::from_cents(110000), prev, &config),
            TrendDirection::Stable
        );
        assert_eq!(
            classify_trend(Money::from_cents(90000), prev, &config),
            TrendDirection::Stable
        );
    }

    #[test]
    fn test_trend_with_zero_previous() {
        let config = InsightConfig::default();
        assert_eq!(
            classify_trend(Money::from_cents(5000), Money::zero(), &config),
            TrendDirection::Increasing
        );
        assert_eq!(
            classify_trend(Money::zero(), Money::zero(), &config),
            TrendDirection::Stable
        );
    }

    #[test]
    fn test_comparison_delta() {
        let history = vec![snapshot_with_total(3, 80000)];
        let records = vec![record(day(2025, 4, 10), Category::Other, 100000)];
        let current = monthly_snapshot(&records, day(2025, 4, 28));

        let insights =
            SpendingInsights::detect(&current, &history, &records, &InsightConfig::default());
        let comparison = insights.comparison.expect("comparison expected");
        assert_eq!(comparison.change.cents(), 20000);
        assert!((comparison.change_pct.unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_comparison_zero_previous_has_no_percentage() {
        let history = vec![monthly_snapshot(&[], day(2025, 3, 28))];
        let records = vec![record(day(2025, 4, 10), Category::Other, 5000)];
        let current = monthly_snapshot(&records, day(2025, 4, 28));

        let insights =
            SpendingInsights::detect(&current, &history, &records, &InsightConfig::default());
        let comparison = insights.comparison.expect("comparison expected");
        assert_eq!(comparison.change.cents(), 5000);
        assert!(comparison.change_pct.is_none());
    }

    #[test]
    fn test_savings_hint_targets_top_category() {
        let records = vec![
            record(day(2025, 4, 5), Category::Rent, 50000),
            record(day(2025, 4, 6), Category::Groceries, 20000),
        ];
        let current = monthly_snapshot(&records, day(2025, 4, 28));

        let insights =
            SpendingInsights::detect(&current, &[], &records, &InsightConfig::default());
        let hint = insights.savings_hint.expect("hint expected");
        assert_eq!(hint.category, Category::Rent);
        assert_eq!(hint.potential_savings.cents(), 5000);
    }

    #[test]
    fn test_custom_thresholds_respected() {
        let config = InsightConfig {
            high_share_ratio: 0.9,
            ..InsightConfig::default()
        };
        let records = vec![
            record(day(2025, 4, 5), Category::Rent, 50000),
            record(day(2025, 4, 6), Category::Groceries, 40000),
        ];
        let current = monthly_snapshot(&records, day(2025, 4, 28));

        let insights = SpendingInsights::detect(&current, &[], &records, &config);
        assert!(insights.high_spend.is_empty());
    }

    #[test]
    fn test_detection_is_deterministic() {
        let history = vec![snapshot_with_total(3, 80000)];
        let records = vec![
            record(day(2025, 4, 5), Category::Rent, 50000),
            record(day(2025, 4, 6), Category::Groceries, 40000),
        ];
        let current = monthly_snapshot(&records, day(2025, 4, 28));
        let config = InsightConfig::default();

        let a = SpendingInsights::detect(&current, &history, &records, &config);
        let b = SpendingInsights::detect(&current, &history, &records, &config);
        assert_eq!(a, b);
    }
}
