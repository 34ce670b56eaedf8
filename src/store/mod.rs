//! In-memory record store
//!
//! Holds the ordered collection of expense records together with the
//! tracked balance. The analytics engine never reads the store directly;
//! it receives record slices, so the collection is immutable for the
//! duration of any analysis pass. Persistence is the embedding
//! application's concern.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{SpendlensError, SpendlensResult};
use crate::models::{Balance, Category, ExpenseRecord, Money, RecordId};

/// Ordered expense records plus the tracked balance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordStore {
    records: Vec<ExpenseRecord>,
    balance: Balance,
}

impl RecordStore {
    /// Create an empty store with a zero balance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with an opening balance
    pub fn with_balance(balance: Money) -> Self {
        Self {
            records: Vec::new(),
            balance: Balance::new(balance),
        }
    }

    /// Add a record, applying its balance deduction
    ///
    /// If the deduction would overdraw the balance the record is not added.
    pub fn add(&mut self, record: ExpenseRecord) -> SpendlensResult<RecordId> {
        self.balance.apply_record(&record)?;
        let id = record.id;
        self.records.push(record);
        Ok(id)
    }

    /// Remove a record by identity, reverting its balance deduction
    pub fn remove(&mut self, id: RecordId) -> SpendlensResult<ExpenseRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| SpendlensError::record_not_found(id.to_string()))?;

        let record = self.records.remove(index);
        self.balance.revert_record(&record);
        Ok(record)
    }

    /// All records in insertion order
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Look up a record by id
    pub fn get(&self, id: RecordId) -> Option<&ExpenseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in a single category, insertion order preserved
    pub fn by_category(&self, category: Category) -> Vec<&ExpenseRecord> {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Records whose date falls in [start, end)
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&ExpenseRecord> {
        self.records
            .iter()
            .filter(|r| r.date >= start && r.date < end)
            .collect()
    }

    /// The tracked balance
    pub fn balance(&self) -> &Balance {
        &self.balance
    }

    /// Mutable access to the tracked balance (deposits, corrections)
    pub fn balance_mut(&mut self) -> &mut Balance {
        &mut self.balance
    }

    /// Summary statistics over all records
    pub fn statistics(&self) -> StoreStatistics {
        if self.records.is_empty() {
            return StoreStatistics::default();
        }

        let total: Money = self.records.iter().map(|r| r.amount).sum();
        let max = self.records.iter().map(|r| r.amount).max().unwrap_or_default();
        let min = self.records.iter().map(|r| r.amount).min().unwrap_or_default();

        let mut categories: Vec<Category> =
            self.records.iter().map(|r| r.category).collect();
        categories.sort();
        categories.dedup();

        StoreStatistics {
            record_count: self.records.len(),
            total_spent: total,
            average: total.div_round(self.records.len() as i64),
            max_record: max,
            min_record: min,
            category_count: categories.len(),
        }
    }
}

/// Aggregate figures over the whole store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub record_count: usize,
    pub total_spent: Money,
    /// Mean record amount, rounded half up
    pub average: Money,
    pub max_record: Money,
    pub min_record: Money,
    /// Number of distinct categories with at least one record
    pub category_count: usize,
}
