//! Error types for the collaborators around the core.
//!
//! The parsers and the aggregator never fail; everything here comes from
//! reading holdings, loading configuration or writing reports.

#[derive(Debug, thiserror::Error)]
pub enum BasketError {
    #[error("failed to read holdings from {path}: {reason}")]
    HoldingsRead { path: String, reason: String },

    #[error("malformed holdings data at row {line}: {reason}")]
    HoldingsFormat { line: u64, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to write report: {reason}")]
    ReportWrite { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BasketError> for std::process::ExitCode {
    fn from(err: &BasketError) -> Self {
        let code: u8 = match err {
            BasketError::Io(_) | BasketError::ReportWrite { .. } => 1,
            BasketError::ConfigParse { .. }
            | BasketError::ConfigMissing { .. }
            | BasketError::ConfigInvalid { .. } => 2,
            BasketError::HoldingsRead { .. } | BasketError::HoldingsFormat { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
