// src/excel/write.rs

use crate::errors::{AppError, AppResult};
use crate::excel::excel_date::parse_to_excel_date;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook};
use std::fs;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

fn wb_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Workbook(e.to_string())
}

/// Rewrite the whole workbook from string grids (row 0 of each grid is the
/// header row), with styling and auto column widths.
///
/// The file is written to a sibling temp path and renamed into place, so a
/// crash mid-write leaves the previous workbook intact.
pub fn write_workbook(path: &Path, sheets: &[(String, Vec<Vec<String>>)]) -> AppResult<()> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (name, grid) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name.as_str()).map_err(wb_err)?;

        let Some((headers, data_rows)) = grid.split_first() else {
            continue;
        };

        for (col, header) in headers.iter().enumerate() {
            worksheet
                .write_with_format(0, col as u16, header.as_str(), &header_format)
                .map_err(wb_err)?;
        }

        worksheet.set_freeze_panes(1, 0).ok();

        let mut col_widths: Vec<usize> = headers
            .iter()
            .map(|h| UnicodeWidthStr::width(h.as_str()))
            .collect();

        for (row_index, row) in data_rows.iter().enumerate() {
            let out_row = (row_index + 1) as u32;
            let band_color = if row_index % 2 == 0 { band1 } else { band2 };

            for (col, value) in row.iter().enumerate() {
                write_cell(worksheet, out_row, col as u16, value, band_color)?;

                if col >= col_widths.len() {
                    col_widths.resize(col + 1, 0);
                }
                col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
            }
        }

        for (c, w) in col_widths.iter().enumerate() {
            worksheet
                .set_column_width(c as u16, *w as f64 + 2.0)
                .map_err(wb_err)?;
        }
    }

    let tmp = path.with_extension("xlsx.tmp");
    workbook.save(&tmp).map_err(wb_err)?;
    fs::rename(&tmp, path)?;

    Ok(())
}

/// Write a single cell, typing strings as date/time/number when they parse
/// as one.
fn write_cell(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
) -> AppResult<()> {
    // Date / time as a real Excel serial
    if let Some((num_format, serial)) = parse_to_excel_date(s) {
        let fmt = Format::new()
            .set_num_format(num_format)
            .set_background_color(bg)
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin);

        worksheet
            .write_with_format(row, col, serial, &fmt)
            .map_err(wb_err)?;
        return Ok(());
    }

    // Generic number
    if let Ok(num) = s.parse::<f64>() {
        let fmt = Format::new()
            .set_align(FormatAlign::Right)
            .set_background_color(bg)
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin);

        worksheet
            .write_with_format(row, col, num, &fmt)
            .map_err(wb_err)?;
        return Ok(());
    }

    // Text
    let fmt = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    worksheet
        .write_with_format(row, col, s, &fmt)
        .map_err(wb_err)?;

    Ok(())
}
