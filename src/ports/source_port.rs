//! Tabular source port trait.

use crate::domain::error::DealboardError;
use crate::domain::raw::RawTable;

/// Reads the deal grid once. Implementations apply the header offset and
/// report any failure to open or decode the source as
/// [`DealboardError::SourceUnavailable`].
pub trait SourcePort {
    fn read_table(&self) -> Result<RawTable, DealboardError>;

    /// Human-readable location, used in logs and reports.
    fn describe(&self) -> String;
}
