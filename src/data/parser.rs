use std::collections::HashMap;

/// Detect the header row in a block of raw records.
///
/// DIC exports often carry a few metadata lines (test id, rig serial,
/// sample rate) above the real header. The header is taken to be the
/// bottom-most row that has the dominant column width and whose cells
/// are all non-empty, non-numeric, non-date text. Returns 0 when no
/// such row exists.
pub fn detect_header_row(rows: &[Vec<String>], max_scan: usize) -> usize {
    let scan = &rows[..rows.len().min(max_scan)];
    if scan.is_empty() {
        return 0;
    }

    // Most common column count among the scanned rows.
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for row in scan {
        *counts.entry(row.len()).or_insert(0) += 1;
    }
    let dominant = counts
        .into_iter()
        .max_by_key(|&(_, c)| c)
        .map(|(len, _)| len)
        .unwrap_or(0);

    for (i, row) in scan.iter().enumerate().rev() {
        if row.len() != dominant {
            continue;
        }
        if row.iter().all(|cell| is_label_cell(cell)) {
            return i;
        }
    }

    0
}

/// A cell counts as a header label when it has content that is neither
/// a number nor a timestamp.
fn is_label_cell(cell: &str) -> bool {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.parse::<f64>().is_ok() {
        return false;
    }
    !is_date_like(trimmed)
}

fn is_date_like(s: &str) -> bool {
    // Cheap pre-filter before trying chrono parses.
    let has_separators = s.contains('/') || s.contains(':');
    let lower = s.to_lowercase();
    let has_date_words = lower.contains("am") || lower.contains("pm");
    if !has_separators && !has_date_words {
        return false;
    }

    use chrono::{NaiveDate, NaiveDateTime};
    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%Y-%m-%d",
        "%m/%d/%Y",
    ];
    for fmt in &formats {
        if NaiveDateTime::parse_from_str(s, fmt).is_ok() {
            return true;
        }
        if NaiveDate::parse_from_str(s, fmt).is_ok() {
            return true;
        }
    }
    false
}
