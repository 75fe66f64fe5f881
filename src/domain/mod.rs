//! Core domain types and logic: normalization, filtering and the read-only
//! projections of a filtered view.

pub mod raw;
pub mod coerce;
pub mod deal;
pub mod normalize;
pub mod filter;
pub mod summary;
pub mod series;
pub mod export;
pub mod error;
