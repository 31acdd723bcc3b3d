// Excel import (calamine) and multi-sheet report export (rust_xlsxwriter)

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{Duration, NaiveDate};
use rust_xlsxwriter::{Format, Workbook};

use phisherman_recon::model::Table;

/// Spreadsheet sheet names cap at 31 characters. Kept for every sink as a
/// cross-format compatibility convention.
pub const MAX_SHEET_NAME: usize = 31;

/// Read the first worksheet of an Excel upload into a raw table.
pub fn import_bytes(bytes: &[u8]) -> Result<Table, String> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook: Sheets<_> =
        open_workbook_auto_from_rs(cursor).map_err(|e| e.to_string())?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| "workbook contains no sheets".to_string())?;

    let range = workbook.worksheet_range(first).map_err(|e| e.to_string())?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for row in range.rows() {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        rows.push(cells);
    }

    Ok(Table::from_rows(rows))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Integers without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Int(n) => format!("{n}"),
        Data::Bool(b) => {
            if *b {
                "TRUE".into()
            } else {
                "FALSE".into()
            }
        }
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => serial_to_iso(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Excel 1900-system serial -> ISO date text, so date columns survive into
/// Period inference. Sub-day fractions are dropped.
fn serial_to_iso(serial: f64) -> String {
    let days = serial.floor() as i64;
    if days <= 0 {
        return format!("{serial}");
    }
    match NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.checked_add_signed(Duration::days(days)))
    {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => format!("{serial}"),
    }
}

/// Truncate to the spreadsheet sheet-name limit.
pub fn sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME).collect()
}

/// Write ordered (sheet name, table) pairs as a single workbook.
pub fn export_workbook(sheets: &[(String, Table)]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for (name, table) in sheets {
        let worksheet = workbook
            .add_worksheet()
            .set_name(sheet_name(name))
            .map_err(|e| format!("sheet '{name}': {e}"))?;

        for (col, header) in table.columns.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, header, &header_format)
                .map_err(|e| e.to_string())?;
        }
        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet
                        .write_string((row_idx + 1) as u32, col_idx as u16, value)
                        .map_err(|e| e.to_string())?;
                }
            }
        }
    }

    workbook.save_to_buffer().map_err(|e| e.to_string())
}

pub fn export_to_path(sheets: &[(String, Table)], path: &Path) -> Result<(), String> {
    let bytes = export_workbook(sheets)?;
    std::fs::write(path, bytes).map_err(|e| e.to_string())
}
