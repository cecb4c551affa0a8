use crate::value::{Matrix, Scalar, Table, Value};
use std::fmt::{self, Write};

/// Row limit used by the `Display` impls.
pub const DEFAULT_MAX_ROWS: usize = 20;

/// Renders `table` as an aligned grid: index column first, then one column per output.
pub fn render_table(table: &Table, max_rows: usize) -> String {
    let mut header = vec![table.index().name().unwrap_or("").to_string()];
    header.extend(table.column_names().map(str::to_string));

    let columns: Vec<&[Scalar]> = table.columns().map(|(_, values)| values).collect();
    let shown = table.num_rows().min(max_rows);
    let rows = (0..shown)
        .map(|r| {
            let label = table.index().label(r).map(|l| l.to_string()).unwrap_or_default();
            std::iter::once(label)
                .chain(columns.iter().map(|col| col[r].to_string()))
                .collect()
        })
        .collect();

    let mut out = render_grid(header, rows);
    if shown < table.num_rows() {
        let _ = writeln!(out, "... ({} more rows)", table.num_rows() - shown);
        let _ = writeln!(out, "[{} rows x {} columns]", table.num_rows(), table.num_columns());
    }
    out
}

/// Renders `matrix` with positional row and column headers.
pub fn render_matrix(matrix: &Matrix, max_rows: usize) -> String {
    let (nrows, ncols) = matrix.shape();
    let mut header = vec![String::new()];
    header.extend((0..ncols).map(|c| c.to_string()));

    let shown = nrows.min(max_rows);
    let rows = (0..shown)
        .map(|r| {
            let cells = matrix.row(r).unwrap_or(&[]);
            std::iter::once(r.to_string())
                .chain(cells.iter().map(|s| s.to_string()))
                .collect()
        })
        .collect();

    let mut out = render_grid(header, rows);
    if shown < nrows {
        let _ = writeln!(out, "... ({} more rows)", nrows - shown);
        let _ = writeln!(out, "[{} rows x {} columns]", nrows, ncols);
    }
    out
}

/// Pretty-printed JSON form of any value.
pub fn render_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

// Right-aligns every cell to its column's widest entry.
fn render_grid(header: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in std::iter::once(&header).chain(rows.iter()) {
        let cells: Vec<String> = line.iter().zip(&widths).map(|(cell, w)| format!("{:>w$}", cell, w = *w)).collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    out
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_table(self, DEFAULT_MAX_ROWS))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_matrix(self, DEFAULT_MAX_ROWS))
    }
}
