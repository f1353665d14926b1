//! Inverted tag index for larger catalogs
//!
//! [`filter::disabled_tags`](super::filter::disabled_tags) rescans the base
//! drills for every candidate tag. `TagIndex` keeps, per tag, the set of
//! catalog positions carrying it, so matching and the zero-hit check become
//! set intersections. Both paths produce the same output.

use crate::catalog::Drill;
use std::collections::{BTreeSet, HashMap};

/// Per-tag sets of drill positions within one catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    postings: HashMap<String, BTreeSet<usize>>,
    len: usize,
}

impl TagIndex {
    /// Index `drills`; positions refer to this slice
    #[must_use]
    pub fn build(drills: &[Drill]) -> Self {
        let mut postings: HashMap<String, BTreeSet<usize>> = HashMap::new();
        for (position, drill) in drills.iter().enumerate() {
            for tag in &drill.tags {
                postings.entry(tag.clone()).or_default().insert(position);
            }
        }
        Self {
            postings,
            len: drills.len(),
        }
    }

    /// Number of indexed drills
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Positions of drills carrying `tag`
    #[must_use]
    pub fn positions(&self, tag: &str) -> Option<&BTreeSet<usize>> {
        self.postings.get(tag)
    }

    /// Positions of drills carrying every selected tag, in catalog order
    #[must_use]
    pub fn matching<S: AsRef<str>>(&self, selected_tags: &[S]) -> BTreeSet<usize> {
        let Some((first, rest)) = selected_tags.split_first() else {
            return (0..self.len).collect();
        };

        let Some(seed) = self.positions(first.as_ref()) else {
            return BTreeSet::new();
        };
        let mut hits = seed.clone();
        for tag in rest {
            match self.positions(tag.as_ref()) {
                Some(postings) => hits.retain(|p| postings.contains(p)),
                None => return BTreeSet::new(),
            }
            if hits.is_empty() {
                break;
            }
        }
        hits
    }

    /// Same result as the scanning `disabled_tags`, restricted to `base`
    ///
    /// `base` holds the positions still in play (e.g. after text search).
    #[must_use]
    pub fn disabled_tags<S, V>(
        &self,
        base: &BTreeSet<usize>,
        selected_tags: &[S],
        vocabulary: &[V],
    ) -> BTreeSet<String>
    where
        S: AsRef<str>,
        V: AsRef<str>,
    {
        let candidates: BTreeSet<usize> = self
            .matching(selected_tags)
            .intersection(base)
            .copied()
            .collect();

        vocabulary
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|tag| !selected_tags.iter().any(|s| s.as_ref() == *tag))
            .filter(|tag| {
                self.positions(tag)
                    .is_none_or(|postings| postings.is_disjoint(&candidates))
            })
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::filter::{disabled_tags, extract_vocabulary, filter_by_tags, filter_by_text};
    use crate::testing::{drill, mixed_catalog};

    #[test]
    fn test_matching_agrees_with_filter() {
        let catalog = mixed_catalog();
        let index = TagIndex::build(&catalog);
        let selections: [&[&str]; 5] = [&[], &["math"], &["grade2"], &["kanji", "grade2"], &["nope"]];

        for selection in selections {
            let expected: Vec<String> = filter_by_tags(&catalog, selection)
                .into_iter()
                .map(|d| d.id)
                .collect();
            let actual: Vec<String> = index
                .matching(selection)
                .into_iter()
                .map(|p| catalog[p].id.clone())
                .collect();
            assert_eq!(actual, expected, "{selection:?}");
        }
    }

    #[test]
    fn test_disabled_tags_agree_with_scan() {
        let catalog = mixed_catalog();
        let vocabulary = extract_vocabulary(&catalog);
        let index = TagIndex::build(&catalog);
        let selections: [&[&str]; 4] = [&[], &["math"], &["grade1"], &["math", "kanji"]];

        for query in ["", "kanji", "grade", "zzz"] {
            let base_drills = filter_by_text(&catalog, query);
            let base: BTreeSet<usize> = base_drills
                .iter()
                .filter_map(|d| catalog.iter().position(|c| c.id == d.id))
                .collect();

            for selection in selections {
                assert_eq!(
                    index.disabled_tags(&base, selection, &vocabulary),
                    disabled_tags(&base_drills, selection, &vocabulary),
                    "query {query:?} selection {selection:?}"
                );
            }
        }
    }

    #[test]
    fn test_empty_index() {
        let index = TagIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.matching::<&str>(&[]).is_empty());
        assert!(index.positions("math").is_none());
    }

    #[test]
    fn test_positions() {
        let catalog = vec![drill("a", "A", &["x"]), drill("b", "B", &["x", "y"])];
        let index = TagIndex::build(&catalog);
        assert_eq!(index.len(), 2);
        assert_eq!(index.positions("x").unwrap().len(), 2);
        assert_eq!(index.positions("y").unwrap().iter().copied().collect::<Vec<_>>(), vec![1]);
    }
}
