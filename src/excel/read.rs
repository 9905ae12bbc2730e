//! Full-sheet reads through calamine.
//!
//! Workbooks are reopened from disk on every call so external edits are
//! always visible; nothing is cached between reads.

use crate::errors::{AppError, AppResult};
use crate::excel::SheetRow;
use crate::excel::excel_date::excel_serial_to_string;
use calamine::{Data, Reader, Xlsx, open_workbook};
use std::path::Path;

fn wb_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Workbook(e.to_string())
}

/// Read one worksheet into header-keyed rows. Returns `None` when the
/// worksheet does not exist. Fully empty rows are skipped.
pub fn read_sheet_rows(path: &Path, sheet: &str) -> AppResult<Option<Vec<SheetRow>>> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(wb_err)?;

    if !workbook.sheet_names().iter().any(|n| n.as_str() == sheet) {
        return Ok(None);
    }

    let range = workbook.worksheet_range(sheet).map_err(wb_err)?;
    let rows: Vec<_> = range.rows().collect();
    if rows.is_empty() {
        return Ok(Some(Vec::new()));
    }

    let headers: Vec<String> = rows[0]
        .iter()
        .map(|c| cell_to_string(c).unwrap_or_default())
        .collect();

    let mut out = Vec::new();
    for row in rows.iter().skip(1) {
        let mut record = SheetRow::new();
        for (i, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            if let Some(value) = row.get(i).and_then(cell_to_string) {
                record.insert(header.clone(), value);
            }
        }
        if !record.is_empty() {
            out.push(record);
        }
    }

    Ok(Some(out))
}

/// Load every worksheet as a raw string grid (header row included), for
/// the read-modify-write cycle behind appends and replaces.
pub fn load_workbook_grids(path: &Path) -> AppResult<Vec<(String, Vec<Vec<String>>)>> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(wb_err)?;
    let names = workbook.sheet_names().to_owned();

    let mut grids = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name).map_err(wb_err)?;
        let grid: Vec<Vec<String>> = range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|c| cell_to_string(c).unwrap_or_default())
                    .collect()
            })
            .collect();
        grids.push((name, grid));
    }

    Ok(grids)
}

/// Stringify a cell the way the sync layer expects: trimmed text, integers
/// without a decimal point, date/time serials rendered back into the
/// worksheet's string formats.
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let t = s.trim();
            if t.is_empty() { None } else { Some(t.to_string()) }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(excel_serial_to_string(dt.as_f64())),
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::DurationIso(s) => Some(s.clone()),
        Data::Error(_) | Data::Empty => None,
    }
}
