//! Raw table → typed [`Dataset`].
//!
//! Columns are matched by trimmed, case-insensitive header name. Only
//! `Trade Date` is mandatory in the header; any other normalized column that
//! is missing reads as absent on every row. Rows whose trade date, amount or
//! rate cannot be coerced are dropped.

use super::coerce;
use super::deal::{
    AMOUNT, CURRENCY, DEAL_TYPE, Dataset, Deal, MATURITY, NORMALIZED_COLUMNS, RATE, TRADE_DATE,
    VALUE_DATE,
};
use super::error::DealboardError;
use super::raw::{EMPTY_CELL, RawTable};
use crate::ports::source_port::SourcePort;

/// Positions of the normalized columns in a source header.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    pub trade_date: usize,
    pub value_date: Option<usize>,
    pub maturity: Option<usize>,
    pub amount: Option<usize>,
    pub rate: Option<usize>,
    pub currency: Option<usize>,
    pub deal_type: Option<usize>,
    /// Passthrough columns as (position, header name), in source order.
    pub extra: Vec<(usize, String)>,
}

impl ColumnMap {
    pub fn resolve(headers: &[String]) -> Result<Self, DealboardError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let trade_date = find(TRADE_DATE).ok_or_else(|| DealboardError::MissingColumn {
            column: TRADE_DATE.to_string(),
        })?;

        let mapped: Vec<usize> = NORMALIZED_COLUMNS.iter().filter_map(|c| find(*c)).collect();
        let extra = headers
            .iter()
            .enumerate()
            .filter(|(i, h)| !mapped.contains(i) && !h.trim().is_empty())
            .map(|(i, h)| (i, h.trim().to_string()))
            .collect();

        Ok(Self {
            trade_date,
            value_date: find(VALUE_DATE),
            maturity: find(MATURITY),
            amount: find(AMOUNT),
            rate: find(RATE),
            currency: find(CURRENCY),
            deal_type: find(DEAL_TYPE),
            extra,
        })
    }
}

/// Outcome counts of a normalization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeStats {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Read the source once and normalize it. Source and header errors abort
/// before any dataset exists.
pub fn load(source: &dyn SourcePort) -> Result<Dataset, DealboardError> {
    tracing::info!(source = %source.describe(), "loading deals");
    let table = source.read_table()?;
    normalize(&table)
}

pub fn normalize(table: &RawTable) -> Result<Dataset, DealboardError> {
    normalize_with_stats(table).map(|(dataset, _)| dataset)
}

pub fn normalize_with_stats(
    table: &RawTable,
) -> Result<(Dataset, NormalizeStats), DealboardError> {
    let columns = ColumnMap::resolve(&table.headers)?;

    let deals: Vec<Deal> = (0..table.rows.len())
        .filter_map(|row| coerce_row(table, row, &columns))
        .collect();

    let stats = NormalizeStats {
        rows_read: table.rows.len(),
        rows_dropped: table.rows.len() - deals.len(),
    };
    tracing::info!(
        rows_read = stats.rows_read,
        rows_kept = deals.len(),
        rows_dropped = stats.rows_dropped,
        "normalized deal table"
    );

    let extra_columns = columns.extra.into_iter().map(|(_, name)| name).collect();
    Ok((Dataset::new(deals, extra_columns), stats))
}

fn coerce_row(table: &RawTable, row: usize, columns: &ColumnMap) -> Option<Deal> {
    let cell = |col: Option<usize>| col.map_or(&EMPTY_CELL, |c| table.cell(row, c));

    let trade_date = coerce::date(table.cell(row, columns.trade_date));
    let amount = coerce::number(cell(columns.amount));
    let rate = coerce::number(cell(columns.rate));

    Some(Deal {
        trade_date: trade_date?,
        value_date: coerce::date(cell(columns.value_date)),
        maturity: coerce::date(cell(columns.maturity)),
        amount: amount?,
        rate: rate?,
        currency: coerce::label(cell(columns.currency)),
        deal_type: coerce::label(cell(columns.deal_type)),
        extra: columns
            .extra
            .iter()
            .map(|(c, _)| coerce::label(table.cell(row, *c)))
            .collect(),
    })
}
