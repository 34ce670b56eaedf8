//! Savings goal model
//!
//! A goal tracks accumulated progress toward a target amount, optionally
//! with a deadline and a lock that reserves the saved amount out of the
//! available balance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SpendlensError, SpendlensResult};

use super::ids::GoalId;
use super::money::Money;

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    /// Short description, e.g. "Emergency fund"
    pub name: String,

    /// Amount to accumulate (strictly positive)
    pub target: Money,

    /// Optional date the goal should be reached by
    pub deadline: Option<NaiveDate>,

    /// Reserve saved funds out of the available balance
    #[serde(default)]
    pub lock_funds: bool,

    /// Accumulated progress (never negative, may exceed the target)
    pub progress: Money,

    /// The day the goal was created
    pub created_on: NaiveDate,
}

impl Goal {
    /// Create a new goal with zero progress
    ///
    /// Rejects empty names and non-positive targets.
    pub fn new(
        name: impl Into<String>,
        target: Money,
        created_on: NaiveDate,
    ) -> SpendlensResult<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(SpendlensError::Config("Goal name cannot be empty".into()));
        }

        if !target.is_positive() {
            return Err(SpendlensError::Config(format!(
                "Goal target must be positive, got {}",
                target
            )));
        }

        Ok(Self {
            id: GoalId::new(),
            name,
            target,
            deadline: None,
            lock_funds: false,
            progress: Money::zero(),
            created_on,
        })
    }

    /// Set a deadline
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Reserve saved funds out of the available balance
    pub fn with_locked_funds(mut self) -> Self {
        self.lock_funds = true;
        self
    }

    /// Add to the accumulated progress
    ///
    /// Negative adjustments are allowed (e.g. withdrawing saved funds) as
    /// long as progress stays non-negative.
    pub fn add_progress(&mut self, amount: Money) -> SpendlensResult<()> {
        let updated = self.progress + amount;
        if updated.is_negative() {
            return Err(SpendlensError::Validation(format!(
                "Goal progress cannot go negative: {} + {}",
                self.progress, amount
            )));
        }
        self.progress = updated;
        Ok(())
    }

    /// Check whether the goal has been reached
    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }

    /// Progress as a fraction of the target, clamped to [0, 1] for display
    pub fn progress_fraction(&self) -> f64 {
        if !self.target.is_positive() {
            return 0.0;
        }
        (self.progress.cents() as f64 / self.target.cents() as f64).clamp(0.0, 1.0)
    }

    /// Amount still needed, floored at zero
    pub fn remaining(&self) -> Money {
        if self.is_complete() {
            Money::zero()
        } else {
            self.target - self.progress
        }
    }

    /// Amount reserved out of the available balance
    ///
    /// min(progress, target) when fund locking is on, zero otherwise. The
    /// reservation only affects how the balance is presented.
    pub fn reserved(&self) -> Money {
        if self.lock_funds {
            self.progress.min(self.target)
        } else {
            Money::zero()
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} of {}", self.name, self.progress, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(target_cents: i64) -> Goal {
        Goal::new("Test goal", Money::from_cents(target_cents), day(2025, 1, 1)).unwrap()
    }

    #[test]
    fn test_new_goal() {
        let g = goal(200000);
        assert_eq!(g.target.cents(), 200000);
        assert!(g.progress.is_zero());
        assert!(!g.is_complete());
        assert!(g.deadline.is_none());
        assert!(!g.lock_funds);
    }

    #[test]
    fn test_rejects_bad_config() {
        let empty_name = Goal::new("  ", Money::from_cents(1000), day(2025, 1, 1));
        assert!(matches!(empty_name, Err(SpendlensError::Config(_))));

        let zero_target = Goal::new("Bike", Money::zero(), day(2025, 1, 1));
        assert!(matches!(zero_target, Err(SpendlensError::Config(_))));
    }

    #[test]
    fn test_add_progress() {
        let mut g = goal(200000);
        g.add_progress(Money::from_cents(50000)).unwrap();
        assert_eq!(g.progress.cents(), 50000);

        // Withdrawal below zero is rejected, progress unchanged
        let err = g.add_progress(Money::from_cents(-60000));
        assert!(err.is_err());
        assert_eq!(g.progress.cents(), 50000);
    }

    #[test]
    fn test_completion_and_remaining() {
        let mut g = goal(200000);
        g.add_progress(Money::from_cents(150000)).unwrap();
        assert!(!g.is_complete());
        assert_eq!(g.remaining().cents(), 50000);

        g.add_progress(Money::from_cents(60000)).unwrap();
        assert!(g.is_complete());
        assert_eq!(g.remaining().cents(), 0);
    }

    #[test]
    fn test_progress_fraction_clamped() {
        let mut g = goal(100000);
        g.add_progress(Money::from_cents(25000)).unwrap();
        assert!((g.progress_fraction() - 0.25).abs() < f64::EPSILON);

        // Internal progress may exceed the target; the fraction may not
        g.add_progress(Money::from_cents(100000)).unwrap();
        assert!((g.progress_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reserved_is_min_of_progress_and_target() {
        let mut g = goal(100000);
        assert!(g.reserved().is_zero());

        g.lock_funds = true;
        g.add_progress(Money::from_cents(40000)).unwrap();
        assert_eq!(g.reserved().cents(), 40000);

        // Overshoot reserves no more than the target
        g.add_progress(Money::from_cents(80000)).unwrap();
        assert_eq!(g.reserved().cents(), 100000);
    }

    #[test]
    fn test_builder_style_options() {
        let g = goal(50000)
            .with_deadline(day(2025, 6, 1))
            .with_locked_funds();
        assert_eq!(g.deadline, Some(day(2025, 6, 1)));
        assert!(g.lock_funds);
    }

    #[test]
    fn test_serialization() {
        let g = goal(75000).with_deadline(day(2025, 9, 30));
        let json = serde_json::to_string(&g).unwrap();
        let deserialized: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(g, deserialized);
    }
}
