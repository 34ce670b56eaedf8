//! Expense record model
//!
//! Records are immutable values: created on entry, never mutated, removed
//! from the store by identity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SpendlensError, SpendlensResult};

use super::category::Category;
use super::ids::RecordId;
use super::money::Money;

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier
    pub id: RecordId,

    /// The day the expense occurred
    pub date: NaiveDate,

    /// Spending category
    pub category: Category,

    /// Amount spent (strictly positive)
    pub amount: Money,

    /// Optional free-form note
    #[serde(default)]
    pub note: String,

    /// Whether this expense was deducted from the tracked balance
    #[serde(default = "default_deducts_balance")]
    pub deducts_balance: bool,
}

fn default_deducts_balance() -> bool {
    true
}

impl ExpenseRecord {
    /// Create a new expense record
    ///
    /// Rejects non-positive amounts; category validity is guaranteed by the
    /// closed [`Category`] enumeration.
    pub fn new(
        date: NaiveDate,
        category: Category,
        amount: Money,
    ) -> SpendlensResult<Self> {
        if !amount.is_positive() {
            return Err(SpendlensError::Validation(format!(
                "Expense amount must be positive, got {}",
                amount
            )));
        }

        Ok(Self {
            id: RecordId::new(),
            date,
            category,
            amount,
            note: String::new(),
            deducts_balance: true,
        })
    }

    /// Create a record with a note attached
    pub fn with_note(
        date: NaiveDate,
        category: Category,
        amount: Money,
        note: impl Into<String>,
    ) -> SpendlensResult<Self> {
        let mut record = Self::new(date, category, amount)?;
        record.note = note.into();
        Ok(record)
    }

    /// Create a record that does not touch the tracked balance
    pub fn untracked(
        date: NaiveDate,
        category: Category,
        amount: Money,
    ) -> SpendlensResult<Self> {
        let mut record = Self::new(date, category, amount)?;
        record.deducts_balance = false;
        Ok(record)
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.category, self.amount)
    }
}
