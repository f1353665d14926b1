//! Cached catalog wrapper
//!
//! Listing the catalog may be slow (a large document, a remote export), so
//! the listing is kept for a time-to-live and can be dropped on demand when
//! the upstream content changes.

use super::error::CatalogError;
use super::types::Drill;
use super::Catalog;
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

const LIST_KEY: &str = "drills";

/// Catalog that memoizes `list_all` of an inner catalog
///
/// Failed listings are not cached; the next call retries the inner catalog.
pub struct CachedCatalog<C> {
    inner: C,
    cache: Cache<&'static str, Arc<Vec<Drill>>>,
}

impl<C: Catalog> CachedCatalog<C> {
    /// Wrap `inner` with the default five minute time-to-live
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self::with_ttl(inner, Duration::from_secs(300))
    }

    #[must_use]
    pub fn with_ttl(inner: C, ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_live(ttl).build();
        Self { inner, cache }
    }

    /// Drop the cached listing so the next read goes to the inner catalog
    pub fn revalidate(&self) {
        tracing::debug!("catalog cache revalidated");
        self.cache.invalidate_all();
    }

    /// Shared handle to the current listing
    ///
    /// # Errors
    ///
    /// Returns the inner catalog's error when the listing is not cached and
    /// cannot be loaded.
    pub fn list_shared(&self) -> Result<Arc<Vec<Drill>>, CatalogError> {
        if let Some(drills) = self.cache.get(LIST_KEY) {
            return Ok(drills);
        }

        let drills = Arc::new(self.inner.list_all()?);
        self.cache.insert(LIST_KEY, Arc::clone(&drills));
        Ok(drills)
    }

    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Catalog> Catalog for CachedCatalog<C> {
    fn list_all(&self) -> Result<Vec<Drill>, CatalogError> {
        Ok(self.list_shared()?.as_ref().clone())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Drill>, CatalogError> {
        Ok(self.list_shared()?.iter().find(|d| d.id == id).cloned())
    }
}
