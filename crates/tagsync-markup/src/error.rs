//! Error types for markup parsing

use thiserror::Error;

/// Errors that can occur while locating tag boundaries
#[derive(Error, Debug)]
pub enum MarkupError {
    /// Error tokenizing the markup source
    #[error("Markup syntax error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Result type for markup operations
pub type Result<T> = std::result::Result<T, MarkupError>;
