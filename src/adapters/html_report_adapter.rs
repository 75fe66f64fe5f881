//! HTML dashboard adapter implementing ReportPort.
//!
//! Renders the dashboard page with an Askama template and an inline SVG
//! rate chart.

use std::fs;
use std::path::Path;

use askama::Template;

use crate::adapters::chart_svg;
use crate::domain::error::DealboardError;
use crate::domain::export;
use crate::domain::series;
use crate::ports::report_port::{Dashboard, ReportPort};

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate<'a> {
    title: &'a str,
    source: &'a str,
    date_range: String,
    currencies: String,
    deal_types: String,
    deal_count: usize,
    total_amount: String,
    average_rate: String,
    chart_svg: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    csv_href: Option<&'a str>,
}

pub struct HtmlReportAdapter;

impl HtmlReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, dashboard: &Dashboard<'_>) -> Result<String, DealboardError> {
        let view = dashboard.view;
        let rate_series = series::by_currency(series::project(view));

        let template = DashboardTemplate {
            title: dashboard.title,
            source: dashboard.source,
            date_range: dashboard
                .spec
                .date_range
                .map(|r| r.to_string())
                .unwrap_or_else(|| "all dates".to_string()),
            currencies: dashboard.spec.currencies.to_string(),
            deal_types: dashboard.spec.deal_types.to_string(),
            deal_count: dashboard.summary.deal_count,
            total_amount: dashboard.summary.total_amount_display(),
            average_rate: dashboard.summary.average_rate_display(),
            chart_svg: chart_svg::generate_rate_svg(&rate_series),
            headers: export::header(view),
            rows: view.iter().map(export::record).collect(),
            csv_href: dashboard.csv_href,
        };

        template.render().map_err(|e| DealboardError::Render {
            reason: e.to_string(),
        })
    }
}

impl Default for HtmlReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for HtmlReportAdapter {
    fn write(&self, dashboard: &Dashboard<'_>, output_path: &Path) -> Result<(), DealboardError> {
        let html = self.render(dashboard)?;

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, html)?;

        tracing::info!(path = %output_path.display(), deals = dashboard.view.len(), "wrote dashboard");
        Ok(())
    }
}
