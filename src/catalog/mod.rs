//! Drill catalog collaborator
//!
//! The catalog is the read-only source of drills for a discovery session.
//! Sessions list it once through [`snapshot`] and work on the in-memory copy
//! from then on.
//!
//! # Implementations
//!
//! - [`InMemoryCatalog`]: a fixed list, for embedding and tests
//! - [`JsonCatalog`]: a JSON document on disk
//! - [`CachedCatalog`]: memoizes any other catalog with a time-to-live

mod cache;
pub mod error;
mod json;
mod types;

pub use cache::CachedCatalog;
pub use error::CatalogError;
pub use json::{JsonCatalog, ingest, parse_catalog};
pub use types::{Drill, RawDrill, TAG_SEPARATOR, Thumbnail, is_valid_tag};

/// Source of drills for discovery sessions
pub trait Catalog: Send + Sync {
    /// List every drill, in catalog order.
    fn list_all(&self) -> Result<Vec<Drill>, CatalogError>;

    /// Look up a single drill by id.
    fn get_by_id(&self, id: &str) -> Result<Option<Drill>, CatalogError>;
}

/// Catalog backed by a fixed list of drills
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    drills: Vec<Drill>,
}

impl InMemoryCatalog {
    #[must_use]
    pub const fn new(drills: Vec<Drill>) -> Self {
        Self { drills }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drills.is_empty()
    }
}

impl Catalog for InMemoryCatalog {
    fn list_all(&self) -> Result<Vec<Drill>, CatalogError> {
        Ok(self.drills.clone())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Drill>, CatalogError> {
        Ok(self.drills.iter().find(|d| d.id == id).cloned())
    }
}

/// List the catalog once for a discovery session
///
/// A failing catalog yields an empty list: the session shows zero results
/// instead of failing.
pub fn snapshot(catalog: &impl Catalog) -> Vec<Drill> {
    match catalog.list_all() {
        Ok(drills) => drills,
        Err(e) => {
            tracing::warn!(error = %e, "catalog unavailable, starting with an empty catalog");
            Vec::new()
        }
    }
}
