//! Concrete adapter implementations for ports.

pub mod chart_svg;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod html_report_adapter;
#[cfg(feature = "xlsx")]
pub mod xlsx_adapter;

use std::path::Path;

use crate::domain::error::DealboardError;
use crate::ports::source_port::SourcePort;

/// Pick a source adapter by file extension: `.csv` reads as CSV, anything
/// else as a workbook.
pub fn open_source(
    path: &Path,
    sheet: &str,
    header_row: usize,
) -> Result<Box<dyn SourcePort>, DealboardError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        return Ok(Box::new(csv_adapter::CsvAdapter::new(
            path.to_path_buf(),
            header_row,
        )));
    }

    #[cfg(feature = "xlsx")]
    {
        Ok(Box::new(xlsx_adapter::XlsxAdapter::new(
            path.to_path_buf(),
            sheet,
            header_row,
        )))
    }

    #[cfg(not(feature = "xlsx"))]
    {
        let _ = sheet;
        Err(DealboardError::SourceUnavailable {
            path: path.display().to_string(),
            reason: "xlsx feature is required for workbook sources".into(),
        })
    }
}
