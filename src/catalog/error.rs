//! Catalog-specific error types
//!
//! These errors describe failures of the catalog collaborator: reading the
//! catalog document, parsing it, or a record that cannot be narrowed into a
//! drill. The discovery session never propagates them; it degrades to an
//! empty catalog instead (see [`crate::catalog::snapshot`]).

use thiserror::Error;

/// Catalog-specific errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog document could not be read
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog document is not valid JSON or has an unexpected shape
    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    /// A single record could not be turned into a drill
    #[error("Invalid drill record: {0}")]
    InvalidRecord(String),

    /// No drill with the requested id
    #[error("Drill not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
