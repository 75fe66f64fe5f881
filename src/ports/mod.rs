//! Port traits: where the domain meets files, config and rendering.

pub mod config_port;
pub mod report_port;
pub mod source_port;
