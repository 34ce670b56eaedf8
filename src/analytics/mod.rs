//! Analytics engine
//!
//! Pure functions over in-memory data: period aggregation, budget and goal
//! evaluation, insight detection, and report composition. Nothing in this
//! module holds state between calls, so re-running the pipeline after any
//! data change is always correct.

pub mod aggregate;
pub mod budgets;
pub mod goals;
pub mod insights;
pub mod report;

pub use aggregate::AggregateSnapshot;
pub use budgets::{evaluate_budgets, BudgetEvaluation, BudgetStatus, BudgetSummary};
pub use goals::{evaluate_goals, GoalCondition, GoalEvaluation, GoalSummary};
pub use insights::{
    AnomalyFlag, FrequentSmallExpenses, HighSpendCategory, InsightConfig, LargeTransaction,
    PeriodComparison, SavingsHint, SpendingInsights, TrendDirection,
};
pub use report::{generate_report, EngineConfig, Report, DEFAULT_TOP_N};
