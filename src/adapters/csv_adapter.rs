//! CSV file source adapter.

use crate::domain::error::DealboardError;
use crate::domain::raw::{RawCell, RawTable};
use crate::ports::source_port::SourcePort;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    path: PathBuf,
    header_row: usize,
}

impl CsvAdapter {
    pub fn new(path: PathBuf, header_row: usize) -> Self {
        Self { path, header_row }
    }

    fn unavailable(&self, reason: impl ToString) -> DealboardError {
        DealboardError::SourceUnavailable {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl SourcePort for CsvAdapter {
    fn read_table(&self) -> Result<RawTable, DealboardError> {
        let content = fs::read(&self.path).map_err(|e| self.unavailable(e))?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_slice());

        let mut grid = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| self.unavailable(format!("CSV parse error: {e}")))?;
            grid.push(
                record
                    .iter()
                    .map(|field| {
                        if field.trim().is_empty() {
                            RawCell::Empty
                        } else {
                            RawCell::text(field)
                        }
                    })
                    .collect(),
            );
        }

        tracing::debug!(path = %self.path.display(), rows = grid.len(), "read csv source");
        Ok(RawTable::from_grid(grid, self.header_row))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
