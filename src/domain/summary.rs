//! Key metrics over a filtered view.

use super::filter::FilteredView;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub deal_count: usize,
    pub total_amount: f64,
    /// Mean rate in percent; `None` when the view is empty.
    pub average_rate: Option<f64>,
}

impl Summary {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        let deal_count = view.len();
        let total_amount = view.iter().fold(0.0, |acc, d| acc + d.amount);
        let average_rate = if deal_count == 0 {
            None
        } else {
            Some(view.iter().map(|d| d.rate).sum::<f64>() / deal_count as f64)
        };
        Self {
            deal_count,
            total_amount,
            average_rate,
        }
    }

    /// Total amount rounded to whole units with thousands separators.
    pub fn total_amount_display(&self) -> String {
        format_thousands(self.total_amount)
    }

    /// Two decimals, or `n/a` when there is nothing to average.
    pub fn average_rate_display(&self) -> String {
        match self.average_rate {
            Some(rate) => format!("{rate:.2}"),
            None => "n/a".to_string(),
        }
    }
}

pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}
