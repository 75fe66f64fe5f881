#![allow(dead_code)]

use chrono::NaiveDate;
use dealboard::domain::deal::{Dataset, Deal};
use dealboard::domain::error::DealboardError;
use dealboard::domain::raw::{RawCell, RawTable};
use dealboard::ports::source_port::SourcePort;
use std::cell::Cell;
use std::path::PathBuf;
use tempfile::TempDir;

/// In-memory source that counts how often it is read.
pub struct MockSource {
    pub table: Option<RawTable>,
    pub reads: Cell<usize>,
}

impl MockSource {
    pub fn new(table: RawTable) -> Self {
        Self {
            table: Some(table),
            reads: Cell::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            table: None,
            reads: Cell::new(0),
        }
    }
}

impl SourcePort for MockSource {
    fn read_table(&self) -> Result<RawTable, DealboardError> {
        self.reads.set(self.reads.get() + 1);
        self.table
            .clone()
            .ok_or_else(|| DealboardError::SourceUnavailable {
                path: "mock".into(),
                reason: "unreadable".into(),
            })
    }

    fn describe(&self) -> String {
        "mock".into()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_deal(
    trade_date: &str,
    currency: Option<&str>,
    deal_type: Option<&str>,
    amount: f64,
    rate: f64,
) -> Deal {
    Deal {
        trade_date: NaiveDate::parse_from_str(trade_date, "%Y-%m-%d").unwrap(),
        value_date: None,
        maturity: None,
        amount,
        rate,
        currency: currency.map(String::from),
        deal_type: deal_type.map(String::from),
        extra: Vec::new(),
    }
}

/// The three-deal dataset used by the worked scenarios.
pub fn three_deals() -> Dataset {
    Dataset::new(
        vec![
            make_deal("2024-01-01", Some("USD"), Some("Swap"), 100.0, 2.5),
            make_deal("2024-01-05", Some("EUR"), Some("Loan"), 200.0, 3.0),
            make_deal("2024-02-01", Some("USD"), Some("Loan"), 300.0, 1.0),
        ],
        Vec::new(),
    )
}

pub const HEADER: &str = "Trade Date,Value date,Maturity,Amount,Rate,Currency,Deal type";

pub fn text_row(cells: &[&str]) -> Vec<RawCell> {
    cells
        .iter()
        .map(|c| {
            if c.is_empty() {
                RawCell::Empty
            } else {
                RawCell::text(*c)
            }
        })
        .collect()
}

/// Banner row, header row, then `rows`, written as a CSV file.
pub fn write_source_csv(rows: &[&str]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deals.csv");
    let mut content = String::from("Financial deals extract,,,,,,\n");
    content.push_str(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
