//! spendlens - Spending analytics and alerting engine
//!
//! This library aggregates personal expense records into periodic
//! statistics, evaluates budget and goal thresholds, detects spending
//! anomalies, and composes immutable reports. It owns no I/O: records,
//! budgets, goals, and the balance are supplied as plain in-memory values,
//! and every evaluator is a pure function over its inputs, so a GUI, CLI,
//! or export layer can consume the results interchangeably.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (records, categories, budgets, goals, etc.)
//! - `store`: In-memory record collection with balance bookkeeping
//! - `analytics`: Period aggregation, budget/goal evaluation, insights, reports
//! - `alerts`: Caller-owned notification state (status ledgers)
//! - `display`: Plain-text report rendering
//! - `export`: CSV and JSON export
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use spendlens::analytics::AggregateSnapshot;
//! use spendlens::models::PeriodKind;
//!
//! let snapshot = AggregateSnapshot::compute(store.records(), PeriodKind::Monthly, today);
//! ```

pub mod alerts;
pub mod analytics;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod store;

pub use error::{SpendlensError, SpendlensResult};
