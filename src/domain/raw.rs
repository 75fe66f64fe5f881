//! Untyped grid read from a source, before normalization.

use chrono::NaiveDate;

pub(crate) static EMPTY_CELL: RawCell = RawCell::Empty;

/// A single cell as delivered by a source adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl RawCell {
    pub fn text(s: impl Into<String>) -> Self {
        RawCell::Text(s.into())
    }
}

/// Header names plus data rows. Rows may be ragged; missing trailing cells
/// read as [`RawCell::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// Split a full grid at `header_row`: rows above it are banner rows and
    /// are discarded, the header row names the columns, the rest are data.
    /// A grid shorter than the header offset yields a table with no headers.
    pub fn from_grid(grid: Vec<Vec<RawCell>>, header_row: usize) -> Self {
        let mut rows = grid.into_iter().skip(header_row);
        let headers = match rows.next() {
            Some(header) => header.iter().map(header_name).collect(),
            None => Vec::new(),
        };
        Self {
            headers,
            rows: rows.collect(),
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> &RawCell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

fn header_name(cell: &RawCell) -> String {
    match cell {
        RawCell::Empty => String::new(),
        RawCell::Text(s) => s.trim().to_string(),
        RawCell::Number(n) => n.to_string(),
        RawCell::Date(d) => d.format("%Y-%m-%d").to_string(),
    }
}
