/// A loaded measurement table: column headers plus raw cell text,
/// column-major. Rows shorter than the header are padded with empty
/// cells at load time, so every column has `row_count` entries.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub columns: Vec<String>,
    /// cells[col_idx][row_idx]
    pub cells: Vec<Vec<String>>,
    pub row_count: usize,
}

impl RawTable {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Build a table from row-major records plus a header row.
    /// Short rows are padded, long rows truncated to the header width.
    pub fn from_rows(columns: Vec<String>, rows: &[Vec<String>]) -> Self {
        let num_cols = columns.len();
        let mut cells: Vec<Vec<String>> = vec![Vec::with_capacity(rows.len()); num_cols];
        for row in rows {
            for (col_idx, col) in cells.iter_mut().enumerate() {
                if col_idx < row.len() {
                    col.push(row[col_idx].clone());
                } else {
                    col.push(String::new());
                }
            }
        }
        Self {
            columns,
            cells,
            row_count: rows.len(),
        }
    }
}
