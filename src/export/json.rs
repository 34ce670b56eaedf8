//! JSON export
//!
//! Serializes the composed report for downstream consumers.

use crate::analytics::Report;
use crate::error::SpendlensResult;

/// Serialize a report to compact JSON
pub fn report_to_json(report: &Report) -> SpendlensResult<String> {
    Ok(serde_json::to_string(report)?)
}

/// Serialize a report to pretty-printed JSON
pub fn report_to_json_pretty(report: &Report) -> SpendlensResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
