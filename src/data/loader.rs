use std::path::Path;

use crate::data::parser;
use crate::data::table::RawTable;

/// Number of leading rows scanned when looking for the header.
const HEADER_SCAN_ROWS: usize = 50;

/// Load a CSV or Excel measurement export into a `RawTable`.
pub fn load_file(path: &Path) -> Result<RawTable, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "xls" | "xlsx" => load_excel(path)?,
        _ => return Err(format!("Unsupported file format: .{ext}")),
    };

    tracing::info!(
        "Loaded {:?}: {} columns, {} rows",
        path,
        table.column_count(),
        table.row_count
    );
    Ok(table)
}

fn load_csv(path: &Path) -> Result<RawTable, String> {
    // Try UTF-8 first; fall back to latin1, where every byte maps to the
    // same Unicode code point.
    let content = std::fs::read(path).map_err(|e| format!("Cannot read file: {e}"))?;
    let text = String::from_utf8(content.clone())
        .unwrap_or_else(|_| content.iter().map(|&b| b as char).collect());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut all_rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => {
                let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
                if !row.is_empty() {
                    all_rows.push(row);
                }
            }
            Err(_) => continue,
        }
    }

    table_from_rows(all_rows)
}

fn load_excel(path: &Path) -> Result<RawTable, String> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook =
        open_workbook_auto(path).map_err(|e| format!("Cannot open Excel file: {e}"))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .ok_or("No sheets found")?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Cannot read sheet: {e}"))?;

    let all_rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    Data::String(s) => s.clone(),
                    Data::Float(f) => f.to_string(),
                    Data::Int(i) => i.to_string(),
                    Data::Bool(b) => b.to_string(),
                    Data::DateTime(dt) => dt.to_string(),
                    Data::DateTimeIso(s) => s.clone(),
                    Data::DurationIso(s) => s.clone(),
                    Data::Error(e) => format!("{e:?}"),
                })
                .collect()
        })
        .collect();

    table_from_rows(all_rows)
}

fn table_from_rows(all_rows: Vec<Vec<String>>) -> Result<RawTable, String> {
    if all_rows.is_empty() {
        return Err("No data found in file".to_string());
    }

    let header_row = parser::detect_header_row(&all_rows, HEADER_SCAN_ROWS);
    if header_row + 1 >= all_rows.len() {
        return Err("No data rows found after the header".to_string());
    }

    let columns: Vec<String> = all_rows[header_row]
        .iter()
        .map(|s| s.trim().to_string())
        .collect();

    Ok(RawTable::from_rows(columns, &all_rows[header_row + 1..]))
}
