//! Alert bookkeeping
//!
//! The evaluators are stateless and report current conditions on every
//! call. The ledgers here are the explicit state objects the calling layer
//! owns and persists: they remember what was already shown so unchanged
//! statuses and one-shot goal events are not re-notified.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analytics::{BudgetEvaluation, BudgetStatus, GoalCondition, GoalEvaluation};
use crate::models::{BudgetId, GoalId, Money};

/// A user-visible budget alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub budget_id: BudgetId,
    pub previous: BudgetStatus,
    pub current: BudgetStatus,
    pub spent: Money,
    pub limit: Money,
}

/// Last-seen budget status, owned by the caller
///
/// Fires an alert only when a budget transitions to a *higher* severity
/// than last observed; budgets never seen before count as Safe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetStatusLedger {
    last_status: HashMap<BudgetId, BudgetStatus>,
}

impl BudgetStatusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an evaluation, returning an alert on upward transitions
    pub fn observe(&mut self, evaluation: &BudgetEvaluation) -> Option<BudgetAlert> {
        let previous = self
            .last_status
            .insert(evaluation.budget_id, evaluation.status)
            .unwrap_or(BudgetStatus::Safe);

        (evaluation.status > previous).then(|| BudgetAlert {
            budget_id: evaluation.budget_id,
            previous,
            current: evaluation.status,
            spent: evaluation.spent,
            limit: evaluation.limit,
        })
    }

    /// Record a batch of evaluations, collecting the alerts they raise
    pub fn observe_all(&mut self, evaluations: &[BudgetEvaluation]) -> Vec<BudgetAlert> {
        evaluations
            .iter()
            .filter_map(|e| self.observe(e))
            .collect()
    }

    /// Drop state for a deleted budget
    pub fn forget(&mut self, budget_id: BudgetId) {
        self.last_status.remove(&budget_id);
    }
}

/// A user-visible goal notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalNotification {
    pub goal_id: GoalId,
    pub name: String,
    pub condition: GoalCondition,
}

/// Already-notified goal events, owned by the caller
///
/// ReachedEightyPercent and Completed fire once per goal; deadline
/// conditions pass through on every call (throttling, if any, is a
/// presentation choice).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalNotificationLedger {
    notified_eighty: HashSet<GoalId>,
    notified_complete: HashSet<GoalId>,
}

impl GoalNotificationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an evaluation, returning the notifications to surface
    pub fn observe(&mut self, evaluation: &GoalEvaluation) -> Vec<GoalNotification> {
        let mut notifications = Vec::new();

        for condition in &evaluation.conditions {
            let fires = match condition {
                GoalCondition::ReachedEightyPercent => {
                    self.notified_eighty.insert(evaluation.goal_id)
                }
                GoalCondition::Completed => {
                    self.notified_complete.insert(evaluation.goal_id)
                }
                GoalCondition::DeadlineApproaching { .. } | GoalCondition::DeadlinePassed => {
                    true
                }
            };

            if fires {
                notifications.push(GoalNotification {
                    goal_id: evaluation.goal_id,
                    name: evaluation.name.clone(),
                    condition: *condition,
                });
            }
        }

        notifications
    }

    /// Record a batch of evaluations, collecting all notifications
    pub fn observe_all(&mut self, evaluations: &[GoalEvaluation]) -> Vec<GoalNotification> {
        evaluations
            .iter()
            .flat_map(|e| self.observe(e))
            .collect()
    }

    /// Drop state for a deleted goal
    pub fn forget(&mut self, goal_id: GoalId) {
        self.notified_eighty.remove(&goal_id);
        self.notified_complete.remove(&goal_id);
    }
}
