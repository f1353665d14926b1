//! Interaction state of a discovery session

/// What the user has chosen: committed search text, selected tags, page
///
/// `selected_tags` keeps toggle order and never holds the same tag twice.
/// `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub search_text: String,
    pub selected_tags: Vec<String>,
    pub page: usize,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            selected_tags: Vec::new(),
            page: 1,
        }
    }
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            self.select_tag(tag.into());
        }
        self
    }

    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    #[must_use]
    pub const fn with_page(mut self, page: usize) -> Self {
        self.page = if page == 0 { 1 } else { page };
        self
    }

    #[must_use]
    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected_tags.iter().any(|t| t == tag)
    }

    /// Add `tag` at the end unless already selected
    ///
    /// Returns true if the tag was added.
    pub fn select_tag(&mut self, tag: String) -> bool {
        if self.is_selected(&tag) {
            return false;
        }
        self.selected_tags.push(tag);
        true
    }

    /// Toggle tag membership
    ///
    /// Returns true if tag was added, false if removed.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
            false
        } else {
            self.selected_tags.push(tag.to_string());
            true
        }
    }

    /// Whether any tag or non-blank query narrows the catalog
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.selected_tags.is_empty() || !self.search_text.trim().is_empty()
    }
}
