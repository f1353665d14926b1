//! Drillfinder - tag and text discovery over a catalog of printable drills
//!
//! The library has two layers:
//!
//! - [`search`]: pure filtering functions (tag AND filter, text search,
//!   disabled-tag computation) and an inverted tag index.
//! - [`discovery`]: a stateful controller that keeps the committed selection,
//!   a debounced search input, the derived result page and a shareable query
//!   string consistent with each other.
//!
//! Drills come from a [`catalog::Catalog`], typically a JSON document on disk.

use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod output;
pub mod search;

#[cfg(test)]
pub mod testing;

pub use catalog::{Catalog, Drill};
pub use discovery::{DiscoveryController, ResultView, SelectionState};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum DrillfinderError {
    /// Catalog error
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, DrillfinderError>;
