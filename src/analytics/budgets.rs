//! Budget evaluation
//!
//! Compares aggregated spending against configured budget limits and
//! classifies each budget into a severity level. The evaluator is
//! stateless: it reports the current status on every call, and alert
//! de-duplication belongs to the caller (see [`crate::alerts`]).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Budget, BudgetId, BudgetScope, Money, PeriodKind};

use super::aggregate::AggregateSnapshot;

/// Width of the caution band below the alert threshold
const CAUTION_BAND: f64 = 0.2;

/// Budget severity levels, ascending
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum BudgetStatus {
    Safe,
    Caution,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    /// Classify a utilization fraction against an alert threshold
    ///
    /// The four bands partition [0, ∞) with no overlap:
    /// Safe < threshold − 0.2 (floored at 0) ≤ Caution < threshold ≤
    /// Warning < 1.0 ≤ Exceeded.
    pub fn classify(utilization: f64, threshold: f64) -> Self {
        let caution_floor = (threshold - CAUTION_BAND).max(0.0);

        if utilization >= 1.0 {
            Self::Exceeded
        } else if utilization >= threshold {
            Self::Warning
        } else if utilization >= caution_floor {
            Self::Caution
        } else {
            Self::Safe
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Caution => write!(f, "Caution"),
            Self::Warning => write!(f, "Warning"),
            Self::Exceeded => write!(f, "Exceeded"),
        }
    }
}

/// The evaluated state of one budget for one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEvaluation {
    pub budget_id: BudgetId,
    pub scope: BudgetScope,
    pub period: PeriodKind,
    pub limit: Money,
    pub spent: Money,
    /// Limit minus spent, floored at zero
    pub remaining: Money,
    /// spent / limit
    pub utilization: f64,
    pub status: BudgetStatus,
}

impl BudgetEvaluation {
    fn new(budget: &Budget, spent: Money) -> Self {
        // Construction guarantees a positive limit; guard anyway rather
        // than let a ratio fault through
        let utilization = if budget.limit.is_positive() {
            spent.cents() as f64 / budget.limit.cents() as f64
        } else {
            0.0
        };

        let remaining = if spent >= budget.limit {
            Money::zero()
        } else {
            budget.limit - spent
        };

        Self {
            budget_id: budget.id,
            scope: budget.scope,
            period: budget.period,
            limit: budget.limit,
            spent,
            remaining,
            utilization,
            status: BudgetStatus::classify(utilization, budget.alert_threshold),
        }
    }

    /// Amount over the limit, zero unless exceeded
    pub fn overspent(&self) -> Money {
        if self.spent > self.limit {
            self.spent - self.limit
        } else {
            Money::zero()
        }
    }
}

/// Evaluate budgets against one aggregate snapshot
///
/// Budgets whose period kind differs from the snapshot's are skipped:
/// a weekly budget cannot be judged from a monthly aggregate.
pub fn evaluate_budgets(snapshot: &AggregateSnapshot, budgets: &[Budget]) -> Vec<BudgetEvaluation> {
    budgets
        .iter()
        .filter(|b| b.period == snapshot.kind)
        .map(|b| BudgetEvaluation::new(b, snapshot.spent_in(&b.scope)))
        .collect()
}

/// Overview across all evaluated budgets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_budgets: usize,
    pub safe_count: usize,
    pub caution_count: usize,
    pub warning_count: usize,
    pub exceeded_count: usize,
    pub total_limit: Money,
    pub total_spent: Money,
    /// total_spent / total_limit, zero when no budgets are configured
    pub overall_utilization: f64,
}

impl BudgetSummary {
    /// Summarize a set of evaluations
    pub fn from_evaluations(evaluations: &[BudgetEvaluation]) -> Self {
        let mut summary = Self {
            total_budgets: evaluations.len(),
            ..Self::default()
        };

        for eval in evaluations {
            match eval.status {
                BudgetStatus::Safe => summary.safe_count += 1,
                BudgetStatus::Caution => summary.caution_count += 1,
                BudgetStatus::Warning => summary.warning_count += 1,
                BudgetStatus::Exceeded => summary.exceeded_count += 1,
            }
            summary.total_limit += eval.limit;
            summary.total_spent += eval.spent;
        }

        summary.overall_utilization = if summary.total_limit.is_positive() {
            summary.total_spent.cents() as f64 / summary.total_limit.cents() as f64
        } else {
            0.0
        };

        summary
    }
}
