//! Deal record and the immutable dataset.

use chrono::NaiveDate;

/// Canonical column names of the normalized schema, in export order.
pub const TRADE_DATE: &str = "Trade Date";
pub const VALUE_DATE: &str = "Value date";
pub const MATURITY: &str = "Maturity";
pub const AMOUNT: &str = "Amount";
pub const RATE: &str = "Rate";
pub const CURRENCY: &str = "Currency";
pub const DEAL_TYPE: &str = "Deal type";

pub const NORMALIZED_COLUMNS: [&str; 7] = [
    TRADE_DATE, VALUE_DATE, MATURITY, AMOUNT, RATE, CURRENCY, DEAL_TYPE,
];

#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    pub trade_date: NaiveDate,
    pub value_date: Option<NaiveDate>,
    pub maturity: Option<NaiveDate>,
    pub amount: f64,
    /// Percentage value, e.g. `2.5` means 2.5%.
    pub rate: f64,
    pub currency: Option<String>,
    pub deal_type: Option<String>,
    /// Cells of the passthrough columns, aligned with [`Dataset::extra_columns`].
    pub extra: Vec<Option<String>>,
}

/// Normalized deals in source row order. Built once, never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    deals: Vec<Deal>,
    extra_columns: Vec<String>,
}

impl Dataset {
    pub fn new(deals: Vec<Deal>, extra_columns: Vec<String>) -> Self {
        Self {
            deals,
            extra_columns,
        }
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn len(&self) -> usize {
        self.deals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    /// Earliest and latest trade date, `None` for an empty dataset.
    pub fn trade_date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.deals.first()?.trade_date;
        Some(self.deals.iter().fold((first, first), |(lo, hi), d| {
            (lo.min(d.trade_date), hi.max(d.trade_date))
        }))
    }

    /// Distinct non-absent currencies in order of first appearance.
    pub fn currencies(&self) -> Vec<String> {
        distinct(self.deals.iter().filter_map(|d| d.currency.as_deref()))
    }

    /// Distinct non-absent deal types in order of first appearance.
    pub fn deal_types(&self) -> Vec<String> {
        distinct(self.deals.iter().filter_map(|d| d.deal_type.as_deref()))
    }
}

fn distinct<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        if !out.iter().any(|seen| seen == label) {
            out.push(label.to_string());
        }
    }
    out
}
