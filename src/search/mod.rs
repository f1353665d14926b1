//! Drill filtering primitives
//!
//! Pure functions over a drill list:
//! 1. Tag filtering (a drill must carry every selected tag)
//! 2. Text search over titles and tags
//! 3. Tag availability: which tags would lead to an empty result
//!
//! [`TagIndex`] answers the same tag questions from an inverted index for
//! large catalogs.

pub mod filter;
pub mod index;

pub use filter::{
    DrillFilterExt, disabled_tags, extract_vocabulary, filter_by_tags, filter_by_text, matches_tags,
    matches_text, tag_counts,
};
pub use index::TagIndex;
