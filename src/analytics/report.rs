//! Report composition
//!
//! Composes aggregator and evaluator outputs into one immutable report
//! value suitable for rendering or serialization. The builder does no
//! analysis of its own; it only structures what the other components
//! computed, normalizing derived ratios to two decimal places
//! (round half up) so repeated builds are bit-identical.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::money::round_half_up;
use crate::models::{
    Balance, Budget, Category, ExpenseRecord, Goal, Money, PeriodKind, PeriodWindow,
};

use super::aggregate::AggregateSnapshot;
use super::budgets::{evaluate_budgets, BudgetEvaluation, BudgetSummary};
use super::goals::{evaluate_goals, GoalEvaluation, GoalSummary};
use super::insights::{InsightConfig, SpendingInsights};

/// Number of top categories a report carries by default
pub const DEFAULT_TOP_N: usize = 3;

/// Engine-wide configuration for one recompute pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Period kind to aggregate and evaluate over
    pub period: PeriodKind,
    /// Insight detection thresholds
    pub insights: InsightConfig,
    /// Number of entries in the top-category ranking
    pub top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            period: PeriodKind::Monthly,
            insights: InsightConfig::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// A composed, immutable analytics report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub period: PeriodKind,
    pub window: PeriodWindow,

    pub total_spent: Money,
    pub daily_average: Money,
    pub record_count: usize,

    pub category_totals: BTreeMap<Category, Money>,
    pub top_categories: Vec<(Category, Money)>,

    pub budgets: Vec<BudgetEvaluation>,
    pub budget_summary: BudgetSummary,

    pub goals: Vec<GoalEvaluation>,
    pub goal_summary: GoalSummary,

    pub insights: SpendingInsights,

    pub balance: Money,
    /// Balance after goal reservations
    pub available_balance: Money,
}

impl Report {
    /// Compose a report from already-computed component outputs
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        snapshot: &AggregateSnapshot,
        budgets: Vec<BudgetEvaluation>,
        goals: Vec<GoalEvaluation>,
        goal_summary: GoalSummary,
        insights: SpendingInsights,
        balance: Money,
        available_balance: Money,
        top_n: usize,
    ) -> Self {
        let budget_summary = BudgetSummary::from_evaluations(&budgets);

        Self {
            period: snapshot.kind,
            window: snapshot.window,
            total_spent: snapshot.overall_total,
            daily_average: snapshot.daily_average,
            record_count: snapshot.record_count,
            category_totals: snapshot.by_category.clone(),
            top_categories: snapshot.top_categories(top_n),
            budgets: budgets.into_iter().map(round_budget).collect(),
            budget_summary: round_budget_summary(budget_summary),
            goals: goals.into_iter().map(round_goal).collect(),
            goal_summary: round_goal_summary(goal_summary),
            insights: round_insights(insights),
            balance,
            available_balance,
        }
    }
}

/// Run the full analytics pipeline for one reference date
///
/// The one synchronous recompute call: aggregate the current and prior
/// windows, evaluate budgets and goals, derive insights, and compose the
/// report. Re-running on unchanged inputs yields an equal report.
pub fn generate_report(
    records: &[ExpenseRecord],
    budgets: &[Budget],
    goals: &[Goal],
    balance: &Balance,
    today: NaiveDate,
    config: &EngineConfig,
) -> Report {
    let (current, previous) =
        AggregateSnapshot::compute_with_previous(records, config.period, today);

    // A period with no records carries no signal; suppress the comparison
    // rather than report a spurious drop to zero
    let history: Vec<AggregateSnapshot> = if previous.record_count > 0 {
        vec![previous]
    } else {
        Vec::new()
    };

    let budget_evals = evaluate_budgets(&current, budgets);
    let goal_evals = evaluate_goals(goals, today);
    let goal_summary = GoalSummary::from_goals(goals);
    let insights = SpendingInsights::detect(&current, &history, records, &config.insights);
    let available = balance.available_after(goals);

    Report::build(
        &current,
        budget_evals,
        goal_evals,
        goal_summary,
        insights,
        balance.amount(),
        available,
        config.top_n,
    )
}

/// Round a derived ratio to two decimal places, half up
///
/// Stable: rounding an already-rounded value returns it unchanged.
pub fn round2(value: f64) -> f64 {
    round_half_up(value * 100.0) as f64 / 100.0
}

fn round_budget(mut eval: BudgetEvaluation) -> BudgetEvaluation {
    eval.utilization = round2(eval.utilization);
    eval
}

fn round_budget_summary(mut summary: BudgetSummary) -> BudgetSummary {
    summary.overall_utilization = round2(summary.overall_utilization);
    summary
}

fn round_goal(mut eval: GoalEvaluation) -> GoalEvaluation {
    eval.progress_fraction = round2(eval.progress_fraction);
    eval
}

fn round_goal_summary(mut summary: GoalSummary) -> GoalSummary {
    summary.overall_progress = round2(summary.overall_progress);
    summary
}

fn round_insights(mut insights: SpendingInsights) -> SpendingInsights {
    for entry in &mut insights.high_spend {
        entry.share = round2(entry.share);
    }
    if let Some(comparison) = &mut insights.comparison {
        comparison.change_pct = comparison.change_pct.map(round2);
    }
    insights
}
