//! CSV export
//!
//! Writes expense records and per-category totals as CSV.

use std::io::Write;

use crate::analytics::AggregateSnapshot;
use crate::error::SpendlensResult;
use crate::models::ExpenseRecord;

/// Export expense records as CSV
///
/// Columns: id, date, category, amount, note, deducts_balance. Amounts
/// are written in whole currency units with two decimals.
pub fn export_records_csv<W: Write>(
    records: &[ExpenseRecord],
    writer: W,
) -> SpendlensResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["id", "date", "category", "amount", "note", "deducts_balance"])?;

    for record in records {
        csv_writer.write_record([
            record.id.as_uuid().to_string(),
            record.date.format("%Y-%m-%d").to_string(),
            record.category.name().to_string(),
            format!("{:.2}", record.amount.as_major()),
            record.note.clone(),
            record.deducts_balance.to_string(),
        ])?;
    }

    csv_writer.flush().map_err(|e| {
        crate::error::SpendlensError::Export(e.to_string())
    })?;
    Ok(())
}

/// Export a snapshot's per-category totals as CSV
///
/// Categories are emitted in descending spending order with a trailing
/// total row.
pub fn export_category_totals_csv<W: Write>(
    snapshot: &AggregateSnapshot,
    writer: W,
) -> SpendlensResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["category", "total"])?;

    for (category, total) in snapshot.top_categories(snapshot.by_category.len()) {
        csv_writer.write_record([
            category.name().to_string(),
            format!("{:.2}", total.as_major()),
        ])?;
    }

    csv_writer.write_record([
        "TOTAL".to_string(),
        format!("{:.2}", snapshot.overall_total.as_major()),
    ])?;

    csv_writer.flush().map_err(|e| {
        crate::error::SpendlensError::Export(e.to_string())
    })?;
    Ok(())
}
