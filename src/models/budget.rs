//! Budget configuration model
//!
//! A budget caps spending for one category (or overall spending) over a
//! weekly or monthly window. Budgets are replaced, never edited in place.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SpendlensError, SpendlensResult};

use super::category::Category;
use super::ids::BudgetId;
use super::money::Money;
use super::period::PeriodKind;

/// Default alert threshold fraction of the limit
pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.8;

/// What a budget's limit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum BudgetScope {
    /// Total spending across all categories
    Overall,
    /// Spending within a single category
    Category(Category),
}

impl fmt::Display for BudgetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overall => write!(f, "Overall"),
            Self::Category(category) => write!(f, "{}", category),
        }
    }
}

/// A spending limit for a scope and period kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub scope: BudgetScope,
    pub period: PeriodKind,
    /// Spending cap for one window (strictly positive)
    pub limit: Money,
    /// Utilization fraction at which alerts begin, in (0, 1]
    pub alert_threshold: f64,
}

impl Budget {
    /// Create a new budget with the default alert threshold
    pub fn new(scope: BudgetScope, period: PeriodKind, limit: Money) -> SpendlensResult<Self> {
        Self::with_threshold(scope, period, limit, DEFAULT_ALERT_THRESHOLD)
    }

    /// Create a new budget with an explicit alert threshold
    ///
    /// Rejects non-positive limits and thresholds outside (0, 1].
    pub fn with_threshold(
        scope: BudgetScope,
        period: PeriodKind,
        limit: Money,
        alert_threshold: f64,
    ) -> SpendlensResult<Self> {
        if !limit.is_positive() {
            return Err(SpendlensError::Config(format!(
                "Budget limit must be positive, got {}",
                limit
            )));
        }

        if !(alert_threshold > 0.0 && alert_threshold <= 1.0) {
            return Err(SpendlensError::Config(format!(
                "Alert threshold must be in (0, 1], got {}",
                alert_threshold
            )));
        }

        Ok(Self {
            id: BudgetId::new(),
            scope,
            period,
            limit,
            alert_threshold,
        })
    }

    /// Create a replacement for this budget, keeping its identity
    pub fn replace(
        &self,
        limit: Money,
        alert_threshold: f64,
    ) -> SpendlensResult<Self> {
        let mut replacement =
            Self::with_threshold(self.scope, self.period, limit, alert_threshold)?;
        replacement.id = self.id;
        Ok(replacement)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} budget: {}", self.scope, self.period, self.limit)
    }
}
