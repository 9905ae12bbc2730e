//! Workbook access: two partition worksheets, full-sheet reads, row appends
//! and full-sheet replaces.
//!
//! The workbook is deliberately treated as an uncached, unlocked resource:
//! every read reopens the file from disk so edits made by a human in Excel
//! are immediately visible, and every mutation rewrites the whole file
//! through a temp-file + rename swap so an interrupted write never leaves a
//! half-written workbook behind. A sync racing a manual edit is resolved by
//! "later write wins".

pub mod excel_date;
pub mod read;
pub mod write;

use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One worksheet row keyed by header name. Cells are stringified; empty
/// cells are absent from the map.
pub type SheetRow = HashMap<String, String>;

pub const PRODUCTIVE_SHEET: &str = "Záznamy";
pub const NON_PRODUCTIVE_SHEET: &str = "Neproduktivní záznamy";

pub const PRODUCTIVE_HEADERS: [&str; 10] = [
    "Date",
    "EmployeeId",
    "EmployeeName",
    "ProjectId",
    "ProjectName",
    "Task",
    "StartTime",
    "EndTime",
    "DurationFormatted",
    "DurationHours",
];

pub const NON_PRODUCTIVE_HEADERS: [&str; 8] = [
    "Date",
    "EmployeeId",
    "EmployeeName",
    "Task",
    "StartTime",
    "EndTime",
    "DurationFormatted",
    "DurationHours",
];

/// Collaborator contract consumed by the Reconciler and the timer logic.
/// Passed in explicitly (never held as a global) so tests can substitute
/// in-memory fakes.
pub trait SpreadsheetStore {
    /// Full-sheet read. A missing workbook or worksheet yields an empty
    /// list, not an error; there is simply nothing to absorb yet.
    fn read_rows(&self, sheet: &str) -> AppResult<Vec<SheetRow>>;

    /// Append one data row, creating the worksheet (with `headers`) first
    /// when it does not exist yet.
    fn append_row(&self, sheet: &str, headers: &[&str], row: Vec<String>) -> AppResult<()>;

    /// Destructive full-sheet replace: rewrite the header row and every
    /// data row.
    fn replace_rows(&self, sheet: &str, headers: &[&str], rows: Vec<Vec<String>>) -> AppResult<()>;
}

/// The real store: a local `.xlsx` file.
pub struct XlsxStore {
    path: PathBuf,
}

impl XlsxStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the workbook with the given worksheets and headers when it
    /// does not exist yet (used by `init`). Existing files are left alone.
    pub fn ensure_workbook(&self, sheets: &[(&str, &[&str])]) -> AppResult<()> {
        if self.path.exists() {
            return Ok(());
        }

        let grids: Vec<(String, Vec<Vec<String>>)> = sheets
            .iter()
            .map(|(name, headers)| {
                (
                    name.to_string(),
                    vec![headers.iter().map(|h| h.to_string()).collect()],
                )
            })
            .collect();

        write::write_workbook(&self.path, &grids)
    }

    /// Reload the whole workbook, hand the target sheet's grid (header row
    /// included) to `mutate`, then rewrite the file. Worksheets other than
    /// the target are carried over untouched.
    fn mutate_sheet<F>(&self, sheet: &str, headers: &[&str], mutate: F) -> AppResult<()>
    where
        F: FnOnce(&mut Vec<Vec<String>>),
    {
        let mut grids = if self.path.exists() {
            read::load_workbook_grids(&self.path)?
        } else {
            Vec::new()
        };

        let idx = match grids.iter().position(|(name, _)| name.as_str() == sheet) {
            Some(i) => i,
            None => {
                grids.push((
                    sheet.to_string(),
                    vec![headers.iter().map(|h| h.to_string()).collect()],
                ));
                grids.len() - 1
            }
        };
        let grid = &mut grids[idx].1;

        if grid.is_empty() {
            grid.push(headers.iter().map(|h| h.to_string()).collect());
        }

        mutate(grid);

        write::write_workbook(&self.path, &grids)
    }
}

impl SpreadsheetStore for XlsxStore {
    fn read_rows(&self, sheet: &str) -> AppResult<Vec<SheetRow>> {
        if !self.path.exists() {
            warning(format!(
                "Workbook {} does not exist yet, nothing to read",
                self.path.display()
            ));
            return Ok(Vec::new());
        }

        match read::read_sheet_rows(&self.path, sheet)? {
            Some(rows) => Ok(rows),
            None => {
                warning(format!("Worksheet '{}' not found", sheet));
                Ok(Vec::new())
            }
        }
    }

    fn append_row(&self, sheet: &str, headers: &[&str], row: Vec<String>) -> AppResult<()> {
        self.mutate_sheet(sheet, headers, |grid| {
            grid.push(row);
        })
    }

    fn replace_rows(&self, sheet: &str, headers: &[&str], rows: Vec<Vec<String>>) -> AppResult<()> {
        self.mutate_sheet(sheet, headers, |grid| {
            // The header row is rewritten too, so sheets carrying legacy
            // column layouts converge to the current one on republish.
            grid.clear();
            grid.push(headers.iter().map(|h| h.to_string()).collect());
            grid.extend(rows);
        })
    }
}
