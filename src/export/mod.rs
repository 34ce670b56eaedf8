//! Export functionality
//!
//! Serializes records and reports to CSV and JSON for consumption outside
//! the engine.

pub mod csv;
pub mod json;

pub use csv::{export_category_totals_csv, export_records_csv};
pub use json::{report_to_json, report_to_json_pretty};
