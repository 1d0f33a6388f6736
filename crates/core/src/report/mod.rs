//! Report rows for display and tabular export.

pub mod rows;

pub use rows::{HEADER, ReportAssembler, ReportRow, TOTAL_LABEL};
