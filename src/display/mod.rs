//! Terminal-facing formatting
//!
//! Renders engine output as plain text. No analysis happens here; the
//! renderer only lays out what the report already contains.

pub mod report;

pub use report::{format_bar, format_percentage, render_report, separator};
