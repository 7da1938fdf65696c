use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::{info, warn};

use crate::config::Template;
use crate::error::{InventoryError, Result};
use crate::export::detail::{Cell, ServerDetail, COLUMN_HEADERS};
use crate::inventory::Server;
use crate::progress::ProgressReporter;

/// Worksheet name used for the inventory
pub const SHEET_NAME: &str = "Target VMs";

/// Outcome of an export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Data rows written
    pub rows: usize,
    /// Servers left out because their vApp has no VMs
    pub skipped: Vec<String>,
}

/// Writes the inventory workbook
pub struct SpreadsheetExporter<'a> {
    templates: &'a [Template],
    progress: Option<&'a ProgressReporter>,
}

impl<'a> SpreadsheetExporter<'a> {
    pub fn new(templates: &'a [Template]) -> Self {
        Self { templates, progress: None }
    }

    pub fn with_progress(mut self, progress: &'a ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Compute the rows without writing anything
    pub fn rows(&self, servers: &[Server]) -> (Vec<ServerDetail>, Vec<String>) {
        let mut rows = Vec::with_capacity(servers.len());
        let mut skipped = Vec::new();

        for server in servers {
            match ServerDetail::from_server(server, self.templates) {
                Some(detail) => rows.push(detail),
                None => {
                    warn!("vApp '{}' has no VMs, leaving it out of the export", server.name());
                    skipped.push(server.name().to_string());
                }
            }
        }

        (rows, skipped)
    }

    /// Write `servers` to a new workbook at `path`, replacing any existing file
    #[tracing::instrument(skip(self, servers), fields(servers = servers.len()))]
    pub fn export(&self, servers: &[Server], path: &Path) -> Result<ExportStats> {
        let (rows, skipped) = self.rows(servers);

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        self.fill(worksheet, &rows)
            .map_err(|e| InventoryError::ExportError(format!("Failed to build sheet: {e}")))?;

        workbook.save(path)
            .map_err(|e| InventoryError::from(e).with_context(format!("Failed to write {}", path.display())))?;

        info!("Exported {} row(s) to {}", rows.len(), path.display());
        Ok(ExportStats { rows: rows.len(), skipped })
    }

    fn fill(&self, worksheet: &mut Worksheet, rows: &[ServerDetail]) -> std::result::Result<(), XlsxError> {
        worksheet.set_name(SHEET_NAME)?;

        let header = Format::new().set_bold();
        for (col, title) in COLUMN_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        if let Some(progress) = self.progress {
            progress.start_rows(rows.len() as u64);
        }

        for (index, detail) in rows.iter().enumerate() {
            let row = index as u32 + 1;
            for (col, cell) in detail.cells().into_iter().enumerate() {
                match cell {
                    Cell::Text(text) => worksheet.write_string(row, col as u16, text)?,
                    Cell::Number(number) => worksheet.write_number(row, col as u16, number)?,
                };
            }
            if let Some(progress) = self.progress {
                progress.increment_rows(1);
            }
        }
        if let Some(progress) = self.progress {
            progress.finish_rows();
        }

        worksheet.autofit();
        Ok(())
    }
}
