//! JSON-document backed catalog
//!
//! Accepts either a bare array of drill records or a list response of the
//! form `{ "contents": [...], "totalCount": n, ... }`. Records that are
//! `null`, malformed, or reuse an id already seen are skipped with a warning;
//! one bad record never fails the whole catalog.

use super::error::CatalogError;
use super::types::{Drill, RawDrill};
use super::Catalog;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Parse a catalog document into drills, in document order
///
/// # Errors
///
/// Returns `CatalogError::Parse` if the text is not JSON, or if it is neither
/// an array nor an object with a `contents` array.
pub fn parse_catalog(text: &str) -> Result<Vec<Drill>, CatalogError> {
    let records = match serde_json::from_str::<Value>(text)? {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("contents") {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(CatalogError::Parse(
                    "expected a 'contents' array in catalog object".to_string(),
                ));
            }
        },
        other => {
            return Err(CatalogError::Parse(format!(
                "expected an array or object, found {}",
                json_kind(&other)
            )));
        }
    };

    Ok(ingest(records))
}

/// Narrow raw JSON records into drills, dropping the ones that don't fit
#[must_use]
pub fn ingest(records: Vec<Value>) -> Vec<Drill> {
    let mut seen = HashSet::new();
    let mut drills = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        if record.is_null() {
            warn!(index, "skipping null catalog entry");
            continue;
        }

        let drill = match serde_json::from_value::<RawDrill>(record)
            .map_err(CatalogError::from)
            .and_then(RawDrill::into_drill)
        {
            Ok(drill) => drill,
            Err(e) => {
                warn!(index, error = %e, "skipping catalog entry");
                continue;
            }
        };

        if !seen.insert(drill.id.clone()) {
            warn!(index, id = %drill.id, "skipping duplicate drill id");
            continue;
        }
        drills.push(drill);
    }

    drills
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Catalog read from a JSON file on every `list_all` call
///
/// Wrap it in [`super::CachedCatalog`] to avoid re-reading the file.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Catalog for JsonCatalog {
    fn list_all(&self) -> Result<Vec<Drill>, CatalogError> {
        let text = fs::read_to_string(&self.path)?;
        let drills = parse_catalog(&text)?;
        tracing::debug!(path = %self.path.display(), count = drills.len(), "loaded catalog");
        Ok(drills)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Drill>, CatalogError> {
        Ok(self.list_all()?.into_iter().find(|d| d.id == id))
    }
}
