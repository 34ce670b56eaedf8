//! Goal evaluation
//!
//! Reports each goal's progress and the notification conditions that
//! currently hold. The evaluator is stateless and reports conditions, not
//! history; one-shot semantics (notify only on first crossing) live in the
//! caller-owned ledgers in [`crate::alerts`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Goal, GoalId, Money};

/// Days before a deadline at which it counts as approaching
const DEADLINE_WINDOW_DAYS: i64 = 7;

/// Fraction of the target at which the near-completion condition starts
const NEAR_COMPLETION_FRACTION: f64 = 0.8;

/// A notification condition that holds for a goal right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum GoalCondition {
    /// Progress has reached 80% of the target but not the target itself
    ReachedEightyPercent,
    /// Progress has reached the target
    Completed,
    /// An unmet deadline falls within the next seven days
    DeadlineApproaching { days_left: i64 },
    /// An unmet deadline has already passed
    DeadlinePassed,
}

/// The evaluated state of one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalEvaluation {
    pub goal_id: GoalId,
    pub name: String,
    pub target: Money,
    pub progress: Money,
    /// progress / target, clamped to [0, 1]
    pub progress_fraction: f64,
    /// Amount still needed, floored at zero
    pub remaining: Money,
    pub conditions: Vec<GoalCondition>,
}

impl GoalEvaluation {
    fn new(goal: &Goal, today: NaiveDate) -> Self {
        let mut conditions = Vec::new();
        let eighty_percent = goal.target.scale(NEAR_COMPLETION_FRACTION);

        if goal.is_complete() {
            conditions.push(GoalCondition::Completed);
        } else if goal.progress >= eighty_percent {
            conditions.push(GoalCondition::ReachedEightyPercent);
        }

        if let Some(deadline) = goal.deadline {
            if !goal.is_complete() {
                let days_left = (deadline - today).num_days();
                if (0..=DEADLINE_WINDOW_DAYS).contains(&days_left) {
                    conditions.push(GoalCondition::DeadlineApproaching { days_left });
                } else if days_left < 0 {
                    conditions.push(GoalCondition::DeadlinePassed);
                }
            }
        }

        Self {
            goal_id: goal.id,
            name: goal.name.clone(),
            target: goal.target,
            progress: goal.progress,
            progress_fraction: goal.progress_fraction(),
            remaining: goal.remaining(),
            conditions,
        }
    }

    /// Check whether a specific condition holds
    pub fn has(&self, condition: GoalCondition) -> bool {
        self.conditions.contains(&condition)
    }
}

/// Evaluate all goals as of the given date
pub fn evaluate_goals(goals: &[Goal], today: NaiveDate) -> Vec<GoalEvaluation> {
    goals.iter().map(|g| GoalEvaluation::new(g, today)).collect()
}

/// Overview across all goals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub total_goals: usize,
    pub active_goals: usize,
    pub completed_goals: usize,
    /// Sum of targets over incomplete goals
    pub total_target: Money,
    /// Sum of progress over incomplete goals
    pub total_saved: Money,
    /// total_saved / total_target, zero when there are no active goals
    pub overall_progress: f64,
}

impl GoalSummary {
    /// Summarize a set of goals
    pub fn from_goals(goals: &[Goal]) -> Self {
        let mut summary = Self {
            total_goals: goals.len(),
            ..Self::default()
        };

        for goal in goals {
            if goal.is_complete() {
                summary.completed_goals += 1;
            } else {
                summary.active_goals += 1;
                summary.total_target += goal.target;
                summary.total_saved += goal.progress;
            }
        }

        summary.overall_progress = if summary.total_target.is_positive() {
            summary.total_saved.cents() as f64 / summary.total_target.cents() as f64
        } else {
            0.0
        };

        summary
    }
}
