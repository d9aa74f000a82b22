use thiserror::Error;

/// Errors that can occur while reading, converting, or writing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// I/O error reading the spreadsheet or writing the catalog
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader could not be created or failed outright
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Catalog JSON could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The header row lacks a column the conversion cannot do without
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// No row in the scanned prefix looked like a column header
    #[error("No header row found in the first {0} rows")]
    HeaderNotFound(usize),

    /// The settings file is unreadable or malformed
    #[error("Settings error: {0}")]
    Settings(String),
}

impl CatalogError {
    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn(name.into())
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}
