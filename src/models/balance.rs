//! Tracked balance
//!
//! The balance is the single mutable scalar in the system, owned by the
//! calling layer. Records with the balance-deduction flag adjust it on
//! creation and deletion; goal locks only change how it is presented.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SpendlensError, SpendlensResult};

use super::goal::Goal;
use super::money::Money;
use super::record::ExpenseRecord;

/// The current tracked balance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(Money);

impl Balance {
    /// Create a balance with an initial amount
    pub fn new(amount: Money) -> Self {
        Self(amount)
    }

    /// Get the current amount
    pub fn amount(&self) -> Money {
        self.0
    }

    /// Add funds
    pub fn deposit(&mut self, amount: Money) {
        self.0 += amount;
    }

    /// Remove funds, failing if the balance would go negative
    pub fn withdraw(&mut self, amount: Money) -> SpendlensResult<()> {
        if amount > self.0 {
            return Err(SpendlensError::InsufficientBalance {
                needed: amount.cents(),
                available: self.0.cents(),
            });
        }
        self.0 -= amount;
        Ok(())
    }

    /// Apply a newly created record's balance effect
    ///
    /// Records without the deduction flag leave the balance untouched.
    pub fn apply_record(&mut self, record: &ExpenseRecord) -> SpendlensResult<()> {
        if record.deducts_balance {
            self.withdraw(record.amount)?;
        }
        Ok(())
    }

    /// Revert a deleted record's balance effect
    pub fn revert_record(&mut self, record: &ExpenseRecord) {
        if record.deducts_balance {
            self.deposit(record.amount);
        }
    }

    /// Balance available after goal reservations, floored at zero
    ///
    /// Does not mutate the balance: locking is presentation only.
    pub fn available_after<'a>(&self, goals: impl IntoIterator<Item = &'a Goal>) -> Money {
        let reserved: Money = goals.into_iter().map(|g| g.reserved()).sum();
        let available = self.0 - reserved;
        if available.is_negative() {
            Money::zero()
        } else {
            available
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
