//! Spreadsheet export of the inventory
//!
//! [`ServerDetail`] turns a server into the values of one row; the
//! [`SpreadsheetExporter`] lays those rows out in an `.xlsx` workbook.

mod detail;
mod xlsx;

pub use detail::{Cell, ServerDetail, COLUMN_HEADERS, DEFAULT_DRIVE_COUNT};
pub use xlsx::{ExportStats, SpreadsheetExporter, SHEET_NAME};

/// File name used when no export path is given
pub fn default_export_path(today: chrono::NaiveDate) -> std::path::PathBuf {
    std::path::PathBuf::from(format!("vcloud-inventory-{}.xlsx", today.format("%Y-%m-%d")))
}
