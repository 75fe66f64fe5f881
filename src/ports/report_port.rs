//! Dashboard rendering port trait.

use std::path::Path;

use crate::domain::error::DealboardError;
use crate::domain::filter::{FilterSpec, FilteredView};
use crate::domain::summary::Summary;

/// Everything a rendered dashboard shows for one filter state.
pub struct Dashboard<'a> {
    pub title: &'a str,
    pub source: &'a str,
    pub spec: &'a FilterSpec,
    pub view: &'a FilteredView<'a>,
    pub summary: &'a Summary,
    /// Link target of the CSV download, relative to the dashboard file.
    pub csv_href: Option<&'a str>,
}

/// Port for writing dashboards.
pub trait ReportPort {
    fn write(&self, dashboard: &Dashboard<'_>, output_path: &Path) -> Result<(), DealboardError>;
}
