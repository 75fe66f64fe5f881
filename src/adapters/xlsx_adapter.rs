//! Workbook source adapter (xlsx, xlsm, xls, ods) backed by calamine.

use std::path::PathBuf;

use calamine::{Data, Reader, open_workbook_auto};

use crate::domain::error::DealboardError;
use crate::domain::raw::{RawCell, RawTable};
use crate::ports::source_port::SourcePort;

pub struct XlsxAdapter {
    path: PathBuf,
    sheet: String,
    header_row: usize,
}

impl XlsxAdapter {
    pub fn new(path: PathBuf, sheet: impl Into<String>, header_row: usize) -> Self {
        Self {
            path,
            sheet: sheet.into(),
            header_row,
        }
    }

    fn unavailable(&self, reason: impl ToString) -> DealboardError {
        DealboardError::SourceUnavailable {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl SourcePort for XlsxAdapter {
    fn read_table(&self) -> Result<RawTable, DealboardError> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| self.unavailable(e))?;
        let range = workbook
            .worksheet_range(&self.sheet)
            .map_err(|e| self.unavailable(format!("sheet '{}': {e}", self.sheet)))?;

        // The range starts at the first used cell; pad back to sheet
        // coordinates so the header offset counts from row 1.
        let (first_row, first_col) = range.start().unwrap_or((0, 0));
        let mut grid: Vec<Vec<RawCell>> = (0..first_row).map(|_| Vec::new()).collect();
        for row in range.rows() {
            let mut cells = vec![RawCell::Empty; first_col as usize];
            cells.extend(row.iter().map(to_raw_cell));
            grid.push(cells);
        }

        tracing::debug!(
            path = %self.path.display(),
            sheet = %self.sheet,
            rows = grid.len(),
            "read workbook source"
        );
        Ok(RawTable::from_grid(grid, self.header_row))
    }

    fn describe(&self) -> String {
        format!("{} [{}]", self.path.display(), self.sheet)
    }
}

fn to_raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        // Durations are elapsed time, not calendar dates.
        Data::DateTime(dt) if dt.is_duration() => RawCell::Empty,
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(RawCell::Empty, |d| RawCell::Date(d.date())),
    }
}
