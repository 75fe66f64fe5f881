//! Inline SVG line chart of rate over trade date, one series per currency.

use chrono::NaiveDate;

use crate::domain::series::{CurrencySeries, SeriesPoint};

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 320.0;
const PADDING: f64 = 48.0;

const PALETTE: [&str; 8] = [
    "#2563eb", "#dc2626", "#16a34a", "#d97706", "#7c3aed", "#0891b2", "#db2777", "#4b5563",
];

pub const UNLABELLED: &str = "(none)";

/// `None` when there is nothing to plot; the caller shows a no-data notice.
pub fn generate_rate_svg(series: &[CurrencySeries<'_>]) -> Option<String> {
    let all = || series.iter().flat_map(|s| s.points.iter());
    let first = all().next()?;

    let (mut min_date, mut max_date) = (first.trade_date, first.trade_date);
    let (mut min_rate, mut max_rate) = (first.rate, first.rate);
    for p in all() {
        min_date = min_date.min(p.trade_date);
        max_date = max_date.max(p.trade_date);
        min_rate = min_rate.min(p.rate);
        max_rate = max_rate.max(p.rate);
    }

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let day_span = (max_date - min_date).num_days() as f64;
    let rate_span = max_rate - min_rate;

    let x = |d: NaiveDate| {
        if day_span > 0.0 {
            PADDING + (d - min_date).num_days() as f64 / day_span * plot_width
        } else {
            PADDING + plot_width / 2.0
        }
    };
    let y = |r: f64| {
        if rate_span > 0.0 {
            HEIGHT - PADDING - (r - min_rate) / rate_span * plot_height
        } else {
            HEIGHT - PADDING - plot_height / 2.0
        }
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH:.0}" height="{HEIGHT:.0}" viewBox="0 0 {WIDTH:.0} {HEIGHT:.0}" role="img" aria-label="Rate over time">"#
    ));
    svg.push_str(&format!(
        r##"<rect x="0" y="0" width="{WIDTH:.0}" height="{HEIGHT:.0}" fill="#ffffff"/>"##
    ));

    // Axes
    svg.push_str(&format!(
        r##"<line x1="{PADDING:.0}" y1="{PADDING:.0}" x2="{PADDING:.0}" y2="{bottom:.0}" stroke="#9ca3af"/><line x1="{PADDING:.0}" y1="{bottom:.0}" x2="{right:.0}" y2="{bottom:.0}" stroke="#9ca3af"/>"##,
        bottom = HEIGHT - PADDING,
        right = WIDTH - PADDING,
    ));
    svg.push_str(&format!(
        r##"<text x="{PADDING:.0}" y="{label_y:.0}" font-size="11" fill="#374151">{min_date}</text><text x="{right:.0}" y="{label_y:.0}" font-size="11" fill="#374151" text-anchor="end">{max_date}</text>"##,
        label_y = HEIGHT - PADDING + 16.0,
        right = WIDTH - PADDING,
    ));
    svg.push_str(&format!(
        r##"<text x="{label_x:.0}" y="{top:.1}" font-size="11" fill="#374151" text-anchor="end">{max_rate:.2}</text><text x="{label_x:.0}" y="{bottom:.1}" font-size="11" fill="#374151" text-anchor="end">{min_rate:.2}</text>"##,
        label_x = PADDING - 6.0,
        top = y(max_rate) + 4.0,
        bottom = y(min_rate) + 4.0,
    ));

    for (i, s) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let name = escape_xml(s.currency.unwrap_or(UNLABELLED));

        let points: Vec<String> = s
            .points
            .iter()
            .map(|p| format!("{:.1},{:.1}", x(p.trade_date), y(p.rate)))
            .collect();
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{color}" stroke-width="2" points="{}"/>"#,
            points.join(" ")
        ));
        for p in &s.points {
            svg.push_str(&format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{color}"><title>{}</title></circle>"#,
                x(p.trade_date),
                y(p.rate),
                tooltip(p, &name),
            ));
        }

        let legend_y = PADDING + 14.0 * i as f64;
        svg.push_str(&format!(
            r##"<rect x="{lx:.0}" y="{ry:.0}" width="10" height="10" fill="{color}"/><text x="{tx:.0}" y="{ty:.0}" font-size="11" fill="#374151">{name}</text>"##,
            lx = WIDTH - PADDING + 4.0,
            ry = legend_y - 9.0,
            tx = WIDTH - PADDING + 18.0,
            ty = legend_y,
        ));
    }

    svg.push_str("</svg>");
    Some(svg)
}

fn tooltip(point: &SeriesPoint<'_>, currency: &str) -> String {
    format!("{} · {} · {}", point.trade_date, currency, point.rate)
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
