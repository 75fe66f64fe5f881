//! Filter engine: trade-date range plus currency and deal-type membership.
//!
//! Label policy: an absent currency or deal type never matches
//! [`LabelFilter::OneOf`], an empty `OneOf` set matches nothing, and
//! [`LabelFilter::Any`] matches every record including unlabelled ones.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use super::deal::{Dataset, Deal};

/// Inclusive trade-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelFilter {
    Any,
    OneOf(BTreeSet<String>),
}

impl LabelFilter {
    pub fn one_of<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LabelFilter::OneOf(labels.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, label: Option<&str>) -> bool {
        match (self, label) {
            (LabelFilter::Any, _) => true,
            (LabelFilter::OneOf(set), Some(l)) => set.contains(l),
            (LabelFilter::OneOf(_), None) => false,
        }
    }
}

impl fmt::Display for LabelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelFilter::Any => write!(f, "any"),
            LabelFilter::OneOf(set) if set.is_empty() => write!(f, "none"),
            LabelFilter::OneOf(set) => {
                let labels: Vec<&str> = set.iter().map(String::as_str).collect();
                write!(f, "{}", labels.join(", "))
            }
        }
    }
}

/// A conjunction of the three predicates. `date_range: None` leaves the
/// trade date unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub date_range: Option<DateRange>,
    pub currencies: LabelFilter,
    pub deal_types: LabelFilter,
}

impl FilterSpec {
    pub fn unconstrained() -> Self {
        Self {
            date_range: None,
            currencies: LabelFilter::Any,
            deal_types: LabelFilter::Any,
        }
    }

    /// Full trade-date span and every label present in the dataset. Records
    /// with an absent label are therefore excluded by default.
    pub fn defaults_for(dataset: &Dataset) -> Self {
        let options = FilterOptions::from_dataset(dataset);
        Self {
            date_range: options.trade_dates,
            currencies: LabelFilter::one_of(options.currencies),
            deal_types: LabelFilter::one_of(options.deal_types),
        }
    }

    pub fn matches(&self, deal: &Deal) -> bool {
        self.date_range
            .is_none_or(|range| range.contains(deal.trade_date))
            && self.currencies.matches(deal.currency.as_deref())
            && self.deal_types.matches(deal.deal_type.as_deref())
    }
}

/// Values a user can pick from, derived from the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub trade_dates: Option<DateRange>,
    pub currencies: Vec<String>,
    pub deal_types: Vec<String>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            trade_dates: dataset
                .trade_date_bounds()
                .map(|(start, end)| DateRange::new(start, end)),
            currencies: dataset.currencies(),
            deal_types: dataset.deal_types(),
        }
    }
}

/// Order-preserving subsequence of a dataset. Rebuilt on every filter change.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    deals: Vec<&'a Deal>,
}

impl<'a> FilteredView<'a> {
    pub fn deals(&self) -> &[&'a Deal] {
        &self.deals
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Deal> + '_ {
        self.deals.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.deals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn extra_columns(&self) -> &'a [String] {
        self.dataset.extra_columns()
    }
}

pub fn apply<'a>(dataset: &'a Dataset, spec: &FilterSpec) -> FilteredView<'a> {
    let deals: Vec<&Deal> = dataset.deals().iter().filter(|d| spec.matches(d)).collect();
    tracing::debug!(
        dataset = dataset.len(),
        matched = deals.len(),
        "applied deal filter"
    );
    FilteredView { dataset, deals }
}
