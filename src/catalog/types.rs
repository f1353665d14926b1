//! Drill records and the loosely typed wire form they are ingested from
//!
//! Upstream stores disagree on field names (`pdf` vs `pdf_url`, an image
//! object vs a bare `thumbnail_url`) and leave `tags` absent or null on some
//! records. [`RawDrill`] accepts all of those shapes; [`RawDrill::into_drill`]
//! is the single place where they are narrowed into a strict [`Drill`].

use super::error::CatalogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Thumbnail image of a drill
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Thumbnail {
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }
}

/// A single printable worksheet in the catalog
///
/// `tags` is never absent: records without tags carry an empty list, and
/// every tag appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Drill {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub thumbnail: Thumbnail,
    pub document_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_at: Option<DateTime<Utc>>,
}

impl Drill {
    /// Create a drill with no tags, thumbnail or document
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags: Vec::new(),
            thumbnail: Thumbnail::default(),
            document_url: String::new(),
            description: None,
            published_at: None,
            revised_at: None,
        }
    }

    /// Replace the tags, normalizing them the same way ingestion does
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags.into_iter().map(|t| Some(t.as_ref().to_string())));
        self
    }

    #[must_use]
    pub fn with_document(mut self, url: impl Into<String>) -> Self {
        self.document_url = url.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check whether the drill carries `tag` (exact, case-sensitive)
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Latest known modification time, falling back to publication
    #[must_use]
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.revised_at.or(self.published_at)
    }
}

/// Image field as found upstream: either an object or a bare URL
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawThumbnail {
    Image(Thumbnail),
    Url(String),
}

/// Drill record as it arrives from a catalog document
#[derive(Debug, Deserialize)]
pub struct RawDrill {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    tags: Option<Vec<Option<String>>>,
    #[serde(default)]
    thumbnail: Option<RawThumbnail>,
    #[serde(default, alias = "thumbnail_url", alias = "thumbnailUrl")]
    thumbnail_link: Option<String>,
    #[serde(default, alias = "pdf", alias = "pdf_url", alias = "documentUrl")]
    document_url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "publishedAt", alias = "created_at")]
    published_at: Option<String>,
    #[serde(default, alias = "revisedAt", alias = "updated_at")]
    revised_at: Option<String>,
}

impl RawDrill {
    /// Narrow the wire record into a [`Drill`]
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidRecord` when the record has no usable
    /// `id` or no `title`. Unparseable timestamps are dropped, not rejected.
    pub fn into_drill(self) -> Result<Drill, CatalogError> {
        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CatalogError::InvalidRecord("missing id".to_string()))?;
        let title = self
            .title
            .ok_or_else(|| CatalogError::InvalidRecord(format!("drill '{id}' has no title")))?;

        let thumbnail = match (self.thumbnail, self.thumbnail_link) {
            (Some(RawThumbnail::Image(image)), _) => image,
            (Some(RawThumbnail::Url(url)), _) | (None, Some(url)) => Thumbnail::from_url(url),
            (None, None) => Thumbnail::default(),
        };

        Ok(Drill {
            tags: normalize_tags(self.tags.unwrap_or_default()),
            thumbnail,
            document_url: self.document_url.unwrap_or_default(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            published_at: self.published_at.as_deref().and_then(parse_timestamp),
            revised_at: self.revised_at.as_deref().and_then(parse_timestamp),
            id,
            title,
        })
    }
}

/// Separator of tag lists in shareable links; no tag may contain it
pub const TAG_SEPARATOR: char = ',';

/// Check whether `tag` can be selected and shared
#[must_use]
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty() && !tag.contains(TAG_SEPARATOR)
}

/// Trim tags, drop null, empty and unshareable entries, keep the first of
/// any duplicates
fn normalize_tags(tags: impl IntoIterator<Item = Option<String>>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags.into_iter().flatten() {
        let tag = tag.trim();
        if tag.contains(TAG_SEPARATOR) {
            tracing::warn!(tag, "skipping tag containing a comma");
            continue;
        }
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!(value, error = %e, "ignoring unparseable timestamp");
            None
        }
    }
}
