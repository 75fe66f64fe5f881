//! Chart projection: one `(trade date, rate, currency)` point per deal.

use chrono::NaiveDate;

use super::filter::FilteredView;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint<'a> {
    pub trade_date: NaiveDate,
    pub rate: f64,
    pub currency: Option<&'a str>,
}

/// Points in view order. The iterator is single-use; project the view again
/// to walk it twice.
pub fn project<'a>(view: &FilteredView<'a>) -> impl Iterator<Item = SeriesPoint<'a>> {
    view.iter().map(|d| SeriesPoint {
        trade_date: d.trade_date,
        rate: d.rate,
        currency: d.currency.as_deref(),
    })
}

/// One line per currency, in order of first appearance, points sorted by
/// trade date. Unlabelled points form their own series keyed `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencySeries<'a> {
    pub currency: Option<&'a str>,
    pub points: Vec<SeriesPoint<'a>>,
}

pub fn by_currency<'a>(points: impl Iterator<Item = SeriesPoint<'a>>) -> Vec<CurrencySeries<'a>> {
    let mut series: Vec<CurrencySeries<'a>> = Vec::new();
    for point in points {
        match series.iter_mut().find(|s| s.currency == point.currency) {
            Some(s) => s.points.push(point),
            None => series.push(CurrencySeries {
                currency: point.currency,
                points: vec![point],
            }),
        }
    }
    for s in &mut series {
        s.points.sort_by_key(|p| p.trade_date);
    }
    series
}
