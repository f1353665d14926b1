//! Testing utilities for drillfinder
//!
//! Fixture builders for drills and catalogs, plus a `CatalogFile` wrapper
//! that writes a catalog document into a temporary directory.
//!
//! Only available when compiled with `cfg(test)`.

use crate::catalog::Drill;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build a drill with the given tags
#[must_use]
pub fn drill(id: &str, title: &str, tags: &[&str]) -> Drill {
    Drill::new(id, title)
        .with_tags(tags)
        .with_document(format!("https://files.example/{id}.pdf"))
}

/// Small catalog with overlapping tags and one untagged drill
///
/// | id | tags            |
/// |----|-----------------|
/// | m1 | math, grade1    |
/// | m2 | math, grade2    |
/// | m3 | math, grade3    |
/// | k1 | kanji, grade1   |
/// | k2 | kanji, grade2   |
/// | c1 | (none)          |
#[must_use]
pub fn mixed_catalog() -> Vec<Drill> {
    vec![
        drill("m1", "Addition Warmup", &["math", "grade1"]),
        drill("m2", "Subtraction Grade 2", &["math", "grade2"]),
        drill("m3", "Multiplication Table", &["math", "grade3"]),
        drill("k1", "Kanji Strokes", &["kanji", "grade1"]),
        drill("k2", "Kanji Reading", &["kanji", "grade2"]),
        drill("c1", "Clock Reading", &[]),
    ]
}

/// `count` drills named `Drill 1..=count`, alternating `odd` / `even` tags
#[must_use]
pub fn numbered_drills(count: usize) -> Vec<Drill> {
    (1..=count)
        .map(|n| {
            let parity = if n % 2 == 0 { "even" } else { "odd" };
            drill(&format!("d{n}"), &format!("Drill {n}"), &[parity])
        })
        .collect()
}

/// Catalog document written to a temporary directory
///
/// The directory and file are removed when the wrapper is dropped.
pub struct CatalogFile {
    _dir: TempDir,
    path: PathBuf,
}

impl CatalogFile {
    /// Write `json` as `drills.json` in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the directory or file cannot be created.
    pub fn new(json: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("drills.json");
        fs::write(&path, json).expect("Failed to write catalog file");
        Self { _dir: dir, path }
    }

    /// Serialize `drills` as a `{ "contents": [...] }` list response
    ///
    /// # Panics
    /// Panics if serialization or writing fails.
    pub fn from_drills(drills: &[Drill]) -> Self {
        let json = serde_json::json!({ "contents": drills, "totalCount": drills.len() });
        Self::new(&json.to_string())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, JsonCatalog};

    #[test]
    fn test_mixed_catalog_shape() {
        let catalog = mixed_catalog();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.iter().any(|d| d.tags.is_empty()));
    }

    #[test]
    fn test_numbered_drills() {
        let drills = numbered_drills(5);
        assert_eq!(drills.len(), 5);
        assert_eq!(drills[0].title, "Drill 1");
        assert_eq!(drills[1].tags, vec!["even"]);
    }

    #[test]
    fn test_catalog_file_round_trips_through_json_catalog() {
        let drills = mixed_catalog();
        let file = CatalogFile::from_drills(&drills);

        let loaded = JsonCatalog::new(file.path()).list_all().unwrap();
        assert_eq!(loaded, drills);
    }

    #[test]
    fn test_catalog_file_cleanup() {
        let path = {
            let file = CatalogFile::new("[]");
            assert!(file.path().exists());
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
