//! Drill predicates used by discovery sessions
//!
//! Everything here is pure: the same inputs always give the same output, and
//! the functions can be called redundantly and in any order.
//!
//! - Tag filtering is AND: a drill matches when it carries every selected tag.
//! - Text search is a case-insensitive substring match on the title or on
//!   any single tag; a blank query matches everything.
//! - A tag is *disabled* when adding it to the current selection would leave
//!   no matching drill. Selected tags are never disabled.
//!
//! # Iterator Adapters
//!
//! [`DrillFilterExt`] adds the same filters to drill iterators:
//!
//! ```
//! use drillfinder::catalog::Drill;
//! use drillfinder::search::filter::DrillFilterExt;
//!
//! let drills = vec![
//!     Drill::new("1", "Apple").with_tags(["fruit"]),
//!     Drill::new("2", "Carrot").with_tags(["vegetable"]),
//! ];
//! let hits = drills.into_iter().filter_tags(&["fruit"]).filter_text("app");
//! assert_eq!(hits.len(), 1);
//! ```

use crate::catalog::Drill;
use std::collections::BTreeSet;

/// Check whether `drill` carries every tag in `selected_tags`
///
/// An empty selection matches every drill, including untagged ones.
#[must_use]
pub fn matches_tags<S: AsRef<str>>(drill: &Drill, selected_tags: &[S]) -> bool {
    selected_tags.iter().all(|tag| drill.has_tag(tag.as_ref()))
}

/// Keep the drills matching all selected tags, preserving input order
#[must_use]
pub fn filter_by_tags<S: AsRef<str>>(drills: &[Drill], selected_tags: &[S]) -> Vec<Drill> {
    if selected_tags.is_empty() {
        return drills.to_vec();
    }
    drills
        .iter()
        .filter(|drill| matches_tags(drill, selected_tags))
        .cloned()
        .collect()
}

/// Trim and lowercase a query; `None` when nothing is left to match
#[must_use]
pub fn normalize_query(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| query.to_lowercase())
}

/// Check whether `drill` matches an already normalized query
#[must_use]
pub fn matches_normalized(drill: &Drill, needle: &str) -> bool {
    drill.title.to_lowercase().contains(needle)
        || drill.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// Case-insensitive substring match against the title or any tag
///
/// Blank queries always match.
#[must_use]
pub fn matches_text(drill: &Drill, query: &str) -> bool {
    normalize_query(query).is_none_or(|needle| matches_normalized(drill, &needle))
}

/// Keep the drills matching `query`, preserving input order
///
/// Returns the input unchanged when the query is blank.
#[must_use]
pub fn filter_by_text(drills: &[Drill], query: &str) -> Vec<Drill> {
    let Some(needle) = normalize_query(query) else {
        return drills.to_vec();
    };
    drills
        .iter()
        .filter(|drill| matches_normalized(drill, &needle))
        .cloned()
        .collect()
}

/// Tags that would produce zero results if added to `selected_tags`
///
/// Only tags from `vocabulary` that are not already selected are considered,
/// so the result never contains a selected tag. Adding `t` to the selection
/// yields a hit exactly when some drill matching the current selection also
/// carries `t`, so `base_drills` is narrowed once and each candidate tag is
/// checked against that narrowed set.
#[must_use]
pub fn disabled_tags<S, V>(base_drills: &[Drill], selected_tags: &[S], vocabulary: &[V]) -> BTreeSet<String>
where
    S: AsRef<str>,
    V: AsRef<str>,
{
    let matching: Vec<&Drill> = base_drills
        .iter()
        .filter(|drill| matches_tags(drill, selected_tags))
        .collect();

    vocabulary
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|tag| !selected_tags.iter().any(|s| s.as_ref() == *tag))
        .filter(|tag| !matching.iter().any(|drill| drill.has_tag(tag)))
        .map(str::to_string)
        .collect()
}

/// Distinct tags across `drills`, sorted by ordinal string order
#[must_use]
pub fn extract_vocabulary(drills: &[Drill]) -> Vec<String> {
    let tags: BTreeSet<&str> = drills
        .iter()
        .flat_map(|drill| drill.tags.iter().map(String::as_str))
        .collect();
    tags.into_iter().map(str::to_string).collect()
}

/// Number of drills carrying each tag, in vocabulary order
#[must_use]
pub fn tag_counts(drills: &[Drill]) -> Vec<(String, usize)> {
    extract_vocabulary(drills)
        .into_iter()
        .map(|tag| {
            let count = drills.iter().filter(|d| d.has_tag(&tag)).count();
            (tag, count)
        })
        .collect()
}

/// Extension trait adding the drill filters to drill iterators
pub trait DrillFilterExt: IntoIterator<Item = Drill> + Sized {
    /// Keep drills carrying every tag in `selected_tags`
    fn filter_tags<S: AsRef<str>>(self, selected_tags: &[S]) -> Vec<Drill> {
        self.into_iter()
            .filter(|drill| matches_tags(drill, selected_tags))
            .collect()
    }

    /// Keep drills whose title or tags contain `query`
    fn filter_text(self, query: &str) -> Vec<Drill> {
        let Some(needle) = normalize_query(query) else {
            return self.into_iter().collect();
        };
        self.into_iter()
            .filter(|drill| matches_normalized(drill, &needle))
            .collect()
    }
}

impl<I> DrillFilterExt for I where I: IntoIterator<Item = Drill> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{drill, mixed_catalog};

    fn ids(drills: &[Drill]) -> Vec<&str> {
        drills.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_empty_selection_matches_everything() {
        let untagged = drill("1", "Untagged", &[]);
        assert!(matches_tags::<&str>(&untagged, &[]));
        assert!(!matches_tags(&untagged, &["math"]));
    }

    #[test]
    fn test_matches_tags_is_subset() {
        let catalog = mixed_catalog();
        let selections: [&[&str]; 5] = [
            &[],
            &["math"],
            &["math", "grade1"],
            &["kanji", "math"],
            &["grade1", "grade2"],
        ];

        for d in &catalog {
            for selection in selections {
                let subset = selection.iter().all(|t| d.tags.iter().any(|dt| dt == t));
                assert_eq!(matches_tags(d, selection), subset, "{} {:?}", d.id, selection);
            }
        }
    }

    #[test]
    fn test_filter_by_tags_uses_and() {
        let catalog = mixed_catalog();
        assert_eq!(ids(&filter_by_tags(&catalog, &["math"])), vec!["m1", "m2", "m3"]);
        assert_eq!(ids(&filter_by_tags(&catalog, &["math", "grade1"])), vec!["m1"]);
        assert!(filter_by_tags(&catalog, &["math", "kanji"]).is_empty());
    }

    #[test]
    fn test_filter_by_tags_is_idempotent() {
        let catalog = mixed_catalog();
        let once = filter_by_tags(&catalog, &["grade1"]);
        let twice = filter_by_tags(&once, &["grade1"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_adding_a_tag_never_grows_results() {
        let catalog = mixed_catalog();
        let vocabulary = extract_vocabulary(&catalog);

        for first in &vocabulary {
            let base = filter_by_tags(&catalog, &[first]).len();
            for second in &vocabulary {
                let narrowed = filter_by_tags(&catalog, &[first, second]).len();
                assert!(narrowed <= base, "{first} + {second}");
            }
        }
    }

    #[test]
    fn test_matches_text_title_and_tags() {
        let apple = drill("1", "Apple Counting", &["fruit", "Grade1"]);
        assert!(matches_text(&apple, "apple"));
        assert!(matches_text(&apple, "  COUNT "));
        assert!(matches_text(&apple, "grade"));
        assert!(matches_text(&apple, "FRU"));
        assert!(!matches_text(&apple, "banana"));
    }

    #[test]
    fn test_blank_query_matches() {
        let untagged = drill("1", "Anything", &[]);
        assert!(matches_text(&untagged, ""));
        assert!(matches_text(&untagged, "   "));
    }

    #[test]
    fn test_untagged_drill_matches_title_query() {
        let untagged = drill("1", "Clock reading", &[]);
        assert!(matches_text(&untagged, "clock"));
        assert!(!matches_text(&untagged, "math"));
    }

    #[test]
    fn test_filter_by_text_keeps_order() {
        let catalog = vec![
            drill("1", "Apple", &["fruit"]),
            drill("2", "Banana", &["fruit"]),
            drill("3", "Pineapple", &[]),
        ];
        assert_eq!(ids(&filter_by_text(&catalog, "App")), vec!["1", "3"]);
        assert_eq!(filter_by_text(&catalog, " "), catalog);
    }

    #[test]
    fn test_disabled_tags_example() {
        let catalog = vec![
            drill("1", "Drill 1", &["tag1", "tag2"]),
            drill("2", "Drill 2", &["tag2", "tag3"]),
            drill("3", "Drill 3", &["tag1"]),
        ];
        let vocabulary = extract_vocabulary(&catalog);

        let disabled = disabled_tags(&catalog, &["tag1"], &vocabulary);
        assert!(disabled.contains("tag3"));
        assert!(!disabled.contains("tag2"));
        assert!(!disabled.contains("tag1"));
    }

    #[test]
    fn test_disabled_tags_sound_and_complete() {
        let catalog = mixed_catalog();
        let vocabulary = extract_vocabulary(&catalog);
        let selections: [&[&str]; 4] = [&[], &["math"], &["grade1"], &["math", "grade2"]];

        for selection in selections {
            let disabled = disabled_tags(&catalog, selection, &vocabulary);
            for tag in &vocabulary {
                if selection.contains(&tag.as_str()) {
                    assert!(!disabled.contains(tag));
                    continue;
                }
                let mut hypothetical: Vec<&str> = selection.to_vec();
                hypothetical.push(tag);
                let empty = filter_by_tags(&catalog, &hypothetical).is_empty();
                assert_eq!(disabled.contains(tag), empty, "{selection:?} + {tag}");
            }
        }
    }

    #[test]
    fn test_selected_tags_never_disabled() {
        let catalog = mixed_catalog();
        let vocabulary = extract_vocabulary(&catalog);
        // No drill has both, yet both stay removable.
        let selection = ["math", "kanji"];
        let disabled = disabled_tags(&catalog, &selection, &vocabulary);
        assert!(!disabled.contains("math"));
        assert!(!disabled.contains("kanji"));
        assert_eq!(disabled.len(), vocabulary.len() - 2);
    }

    #[test]
    fn test_extract_vocabulary_sorted_distinct() {
        let catalog = vec![
            drill("1", "A", &["b", "a"]),
            drill("2", "B", &["c", "a"]),
            drill("3", "C", &[]),
        ];
        assert_eq!(extract_vocabulary(&catalog), vec!["a", "b", "c"]);
        assert!(extract_vocabulary(&[]).is_empty());
    }

    #[test]
    fn test_vocabulary_is_ordinal() {
        let catalog = vec![drill("1", "A", &["b", "B", "あ", "a"])];
        assert_eq!(extract_vocabulary(&catalog), vec!["B", "a", "b", "あ"]);
    }

    #[test]
    fn test_tag_counts() {
        let catalog = mixed_catalog();
        let counts = tag_counts(&catalog);
        assert!(counts.contains(&("math".to_string(), 3)));
        assert!(counts.contains(&("kanji".to_string(), 2)));
    }

    #[test]
    fn test_filter_ext_chaining() {
        let catalog = mixed_catalog();
        let result = catalog
            .into_iter()
            .filter_tags(&["math"])
            .filter_text("grade 2");
        assert_eq!(ids(&result), vec!["m2"]);
    }
}
