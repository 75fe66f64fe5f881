//! Domain error types.

/// Top-level error type for dealboard.
#[derive(Debug, thiserror::Error)]
pub enum DealboardError {
    #[error("source unavailable {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid argument {arg}: {reason}")]
    InvalidArgument { arg: String, reason: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DealboardError> for std::process::ExitCode {
    fn from(err: &DealboardError) -> Self {
        let code: u8 = match err {
            DealboardError::Io(_) | DealboardError::Csv(_) | DealboardError::Render { .. } => 1,
            DealboardError::ConfigParse { .. }
            | DealboardError::ConfigInvalid { .. }
            | DealboardError::InvalidArgument { .. } => 2,
            DealboardError::SourceUnavailable { .. } => 3,
            DealboardError::MissingColumn { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
