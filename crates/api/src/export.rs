//! CSV export of contract reports.

use costrecon_core::report::{HEADER, ReportRow};
use thiserror::Error;

/// Content type of exported reports.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Download filename of exported reports.
pub const EXPORT_FILENAME: &str = "cost_report.csv";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Buffer flush failed.
    #[error("CSV flush error: {0}")]
    Flush(String),
}

/// Writes the header row followed by `rows` as CSV.
pub fn rows_to_csv(rows: &[ReportRow]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))
}
