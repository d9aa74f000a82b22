use thiserror::Error;

use barback_catalog::CatalogError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Reading, converting, or writing a catalog failed
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// A catalog or conversion did not pass its checks
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
