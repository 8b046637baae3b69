use crate::data::table::RawTable;
use crate::processing::ConfigError;

/// Scale applied to every channel value: the device reports fractional
/// strain, downstream analysis works in percent.
pub const STRAIN_TO_PERCENT: f64 = 100.0;

/// The numeric table after global cleaning. All groups are built against
/// this one table so they share a single row index space.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    /// values[col_idx][row_idx]
    pub values: Vec<Vec<f64>>,
    pub row_count: usize,
    /// Rows discarded because some cell failed numeric coercion.
    pub dropped_rows: usize,
}

/// Coerce every cell to `f64` and drop each row where any column fails.
/// A cell fails when it does not parse or parses non-finite.
///
/// Cleaning is computed once against the full table, independent of
/// which groups are defined later.
pub fn clean(table: &RawTable) -> CleanedTable {
    let num_cols = table.column_count();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); num_cols];
    let mut dropped_rows = 0usize;
    let mut row_buf: Vec<f64> = Vec::with_capacity(num_cols);

    for row in 0..table.row_count {
        row_buf.clear();
        let mut ok = true;
        for col in table.cells.iter() {
            match col[row].trim().parse::<f64>() {
                Ok(v) if v.is_finite() => row_buf.push(v),
                _ => {
                    ok = false;
                    break;
                }
            }
        }
        if ok {
            for (col, &v) in values.iter_mut().zip(row_buf.iter()) {
                col.push(v);
            }
        } else {
            dropped_rows += 1;
        }
    }

    let row_count = table.row_count - dropped_rows;
    if dropped_rows > 0 {
        tracing::info!(
            "Cleaning dropped {dropped_rows} of {} rows with non-numeric cells",
            table.row_count
        );
    }

    CleanedTable {
        values,
        row_count,
        dropped_rows,
    }
}

/// Average the group's columns row-wise and convert to percent. A
/// single-column group is simply that column scaled.
pub fn build_channel(cleaned: &CleanedTable, indices: &[usize]) -> Result<Vec<f64>, ConfigError> {
    if indices.is_empty() {
        return Err(ConfigError::EmptyGroup);
    }

    let mut channel = Vec::with_capacity(cleaned.row_count);
    for row in 0..cleaned.row_count {
        let sum: f64 = indices.iter().map(|&col| cleaned.values[col][row]).sum();
        channel.push(sum / indices.len() as f64 * STRAIN_TO_PERCENT);
    }
    Ok(channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::from_rows(
            columns.iter().map(|s| s.to_string()).collect(),
            &rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect::<Vec<Vec<String>>>(),
        )
    }

    #[test]
    fn two_column_group_averages_and_scales() {
        let raw = table(
            &["a", "b"],
            &[&["2", "4"], &["4", "6"], &["6", "8"]],
        );
        let cleaned = clean(&raw);
        let channel = build_channel(&cleaned, &[0, 1]).unwrap();
        assert_eq!(channel, vec![300.0, 500.0, 700.0]);
    }

    #[test]
    fn single_column_group_is_scaled_column() {
        let raw = table(&["a", "b"], &[&["1", "9"], &["2", "9"]]);
        let cleaned = clean(&raw);
        let channel = build_channel(&cleaned, &[0]).unwrap();
        assert_eq!(channel, vec![100.0, 200.0]);
    }

    #[test]
    fn bad_cell_drops_whole_row_for_all_groups() {
        // The bad cell sits in column b, but the row disappears from a
        // group over column a as well: cleaning is global.
        let raw = table(
            &["a", "b"],
            &[&["1", "5"], &["2", "oops"], &["3", "7"]],
        );
        let cleaned = clean(&raw);
        assert_eq!(cleaned.row_count, 2);
        assert_eq!(cleaned.dropped_rows, 1);
        let channel = build_channel(&cleaned, &[0]).unwrap();
        assert_eq!(channel, vec![100.0, 300.0]);
    }

    #[test]
    fn non_finite_cells_drop_rows() {
        let raw = table(&["a"], &[&["1"], &["NaN"], &["inf"], &["4"]]);
        let cleaned = clean(&raw);
        assert_eq!(cleaned.row_count, 2);
        assert_eq!(cleaned.values[0], vec![1.0, 4.0]);
    }

    #[test]
    fn empty_group_is_rejected() {
        let raw = table(&["a"], &[&["1"]]);
        let cleaned = clean(&raw);
        assert_eq!(build_channel(&cleaned, &[]), Err(ConfigError::EmptyGroup));
    }

    #[test]
    fn empty_table_cleans_to_empty() {
        let raw = table(&["a", "b"], &[]);
        let cleaned = clean(&raw);
        assert_eq!(cleaned.row_count, 0);
        assert!(build_channel(&cleaned, &[0]).unwrap().is_empty());
    }
}
