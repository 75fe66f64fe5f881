//! CSV serialization of a filtered view.

use std::io::Write;

use chrono::NaiveDate;

use super::deal::{Deal, NORMALIZED_COLUMNS};
use super::error::DealboardError;
use super::filter::FilteredView;

pub const EXPORT_FILE_NAME: &str = "filtered_deals.csv";

/// Normalized columns first, then passthrough columns in source order.
pub fn header(view: &FilteredView<'_>) -> Vec<String> {
    NORMALIZED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(view.extra_columns().iter().cloned())
        .collect()
}

/// Field values of one deal in [`header`] order. Absent values are empty.
pub fn record(deal: &Deal) -> Vec<String> {
    let date = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
    let mut fields = vec![
        date(Some(deal.trade_date)),
        date(deal.value_date),
        date(deal.maturity),
        deal.amount.to_string(),
        deal.rate.to_string(),
        deal.currency.clone().unwrap_or_default(),
        deal.deal_type.clone().unwrap_or_default(),
    ];
    fields.extend(deal.extra.iter().map(|v| v.clone().unwrap_or_default()));
    fields
}

pub fn write_csv<W: Write>(view: &FilteredView<'_>, writer: W) -> Result<(), DealboardError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header(view))?;
    for deal in view.iter() {
        wtr.write_record(record(deal))?;
    }
    wtr.flush()?;
    tracing::debug!(rows = view.len(), "exported filtered view");
    Ok(())
}

pub fn to_csv_string(view: &FilteredView<'_>) -> Result<String, DealboardError> {
    let mut buf = Vec::new();
    write_csv(view, &mut buf)?;
    String::from_utf8(buf).map_err(|e| DealboardError::Render {
        reason: format!("export is not valid UTF-8: {e}"),
    })
}
