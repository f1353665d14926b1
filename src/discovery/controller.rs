//! Stateful discovery controller
//!
//! See the [module documentation](super) for the synchronization model.

use super::debounce::{Clock, Debouncer, SystemClock, Ticket};
use super::history::{HistorySink, MemoryHistory};
use super::location;
use super::selection::SelectionState;
use super::view::ResultView;
use super::{DiscoverySettings, UnknownTagPolicy};
use crate::catalog::{self, Catalog, Drill};
use crate::search::TagIndex;
use crate::search::filter::{self, DrillFilterExt};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::debug;

/// Discovery session over one catalog snapshot
///
/// Use [`DiscoveryController::builder()`] to construct.
pub struct DiscoveryController {
    drills: Vec<Drill>,
    vocabulary: Vec<String>,
    index: Option<TagIndex>,
    settings: DiscoverySettings,
    /// Text as typed, ahead of the committed `selection.search_text`
    search_input: String,
    selection: SelectionState,
    pending_search: Debouncer<String>,
    view: ResultView,
    /// Last query string written to (or read from) the outside
    location: String,
    history: Box<dyn HistorySink>,
    clock: Box<dyn Clock>,
}

impl DiscoveryController {
    /// Create a new builder for constructing a `DiscoveryController`
    #[must_use]
    pub fn builder() -> DiscoveryControllerBuilder {
        DiscoveryControllerBuilder::new()
    }

    // Mutation entry points

    /// Update the visible search text and schedule its commit
    ///
    /// The results follow once the text has been stable for the debounce
    /// window (see [`tick`](Self::tick)). Emptying the text commits at once.
    /// Repeating the current text does nothing, and in particular does not
    /// restart the quiet window.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.search_input {
            return;
        }
        self.search_input = text;

        if self.search_input.is_empty() {
            self.pending_search.cancel();
            self.commit_search(String::new());
        } else {
            let now = self.clock.now();
            let ticket = self.pending_search.schedule(self.search_input.clone(), now);
            debug!(
                ?ticket,
                quiet_ms = self.pending_search.quiet().as_millis(),
                "scheduled search commit"
            );
        }
    }

    /// Commit the pending search text if its quiet window has elapsed
    ///
    /// Hosts call this from their event loop. Returns true when the
    /// committed search text changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        match self.pending_search.poll(now) {
            Some(text) => self.commit_search(text),
            None => false,
        }
    }

    /// Commit the pending search text for a timer armed from [`search_timer`](Self::search_timer)
    ///
    /// A ticket from an earlier edit commits nothing. Returns true when the
    /// committed search text changed.
    pub fn fire_search_timer(&mut self, ticket: Ticket) -> bool {
        let now = self.clock.now();
        match self.pending_search.fire(ticket, now) {
            Some(text) => self.commit_search(text),
            None => false,
        }
    }

    /// Commit the pending search text now (e.g. on submit)
    pub fn flush_search(&mut self) -> bool {
        match self.pending_search.flush() {
            Some(text) => self.commit_search(text),
            None => false,
        }
    }

    /// Add or remove `tag` from the selection and go back to page 1
    ///
    /// Returns false when nothing changed: an empty tag, a tag containing the
    /// `,` list separator, or a tag outside the
    /// vocabulary under [`UnknownTagPolicy::Drop`].
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if !catalog::is_valid_tag(tag) {
            debug!(tag, "ignoring invalid tag");
            return false;
        }
        if self.settings.unknown_tags == UnknownTagPolicy::Drop
            && !self.selection.is_selected(tag)
            && !self.is_known_tag(tag)
        {
            debug!(tag, "ignoring toggle of unknown tag");
            return false;
        }

        let added = self.selection.toggle_tag(tag);
        debug!(tag, added, "toggled tag");
        self.selection.page = 1;
        self.recompute();
        self.publish();
        true
    }

    /// Deselect every tag and go back to page 1
    pub fn clear_tags(&mut self) {
        self.selection.selected_tags.clear();
        self.selection.page = 1;
        self.recompute();
        self.publish();
    }

    /// Empty the search text, visible and committed, immediately
    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.pending_search.cancel();
        self.commit_search(String::new());
    }

    /// Reset tags, search text and page in one step
    pub fn clear_all(&mut self) {
        self.search_input.clear();
        self.pending_search.cancel();
        self.selection = SelectionState::default();
        self.recompute();
        self.publish();
    }

    /// Show page `page`, clamped into the current page range
    ///
    /// Only the page items change; the filtered results stay as they are.
    /// Returns the page actually shown.
    pub fn request_page(&mut self, page: usize) -> usize {
        let page = self.view.set_page(page, self.settings.page_size);
        self.selection.page = page;
        self.publish();
        page
    }

    /// Re-derive all state from an externally changed query string
    ///
    /// Used for history navigation. Drops any pending search edit and does
    /// not write back to the history sink.
    pub fn sync_from_location(&mut self, query: &str) {
        debug!(location = query, "syncing from location");
        self.apply_location(query);
    }

    // Presentation callbacks

    pub fn on_toggle_tag(&mut self, tag: &str) {
        self.toggle_tag(tag);
    }

    pub fn on_clear_tags(&mut self) {
        self.clear_tags();
    }

    pub fn on_search_change(&mut self, text: &str) {
        self.set_search_text(text);
    }

    pub fn on_clear_search(&mut self) {
        self.clear_search();
    }

    pub fn on_page_change(&mut self, page: usize) {
        self.request_page(page);
    }

    // Read entry points

    /// Results for the committed state; pending search text is not applied
    #[must_use]
    pub const fn current_view(&self) -> &ResultView {
        &self.view
    }

    /// Alias of [`current_view`](Self::current_view) for presentation surfaces
    #[must_use]
    pub const fn view(&self) -> &ResultView {
        &self.view
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Search text as currently typed
    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Distinct catalog tags in display order
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Canonical query string of the committed state
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Shareable path, e.g. `/?tags=math&page=2`
    #[must_use]
    pub fn share_path(&self) -> String {
        location::share_path(&self.selection)
    }

    #[must_use]
    pub const fn has_pending_search(&self) -> bool {
        self.pending_search.is_pending()
    }

    /// Search text waiting for its quiet window, if any
    #[must_use]
    pub fn pending_search_text(&self) -> Option<&str> {
        self.pending_search.pending().map(String::as_str)
    }

    /// Ticket and deadline for a host timer that should fire the pending search
    #[must_use]
    pub fn search_timer(&self) -> Option<(Ticket, Instant)> {
        self.pending_search.timer()
    }

    #[must_use]
    pub fn drills(&self) -> &[Drill] {
        &self.drills
    }

    #[must_use]
    pub const fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    #[must_use]
    pub fn get_drill(&self, id: &str) -> Option<&Drill> {
        self.drills.iter().find(|d| d.id == id)
    }

    // Internals

    fn is_known_tag(&self, tag: &str) -> bool {
        self.vocabulary
            .binary_search_by(|known| known.as_str().cmp(tag))
            .is_ok()
    }

    fn apply_location(&mut self, query: &str) {
        let mut selection = location::decode(query);
        if self.settings.unknown_tags == UnknownTagPolicy::Drop {
            selection.selected_tags.retain(|tag| {
                let known = self.is_known_tag(tag);
                if !known {
                    debug!(tag = %tag, "dropping unknown tag from location");
                }
                known
            });
        }

        self.pending_search.cancel();
        self.search_input = selection.search_text.clone();
        self.selection = selection;
        self.recompute();
        self.location = location::encode(&self.selection);
    }

    fn commit_search(&mut self, text: String) -> bool {
        if text == self.selection.search_text {
            return false;
        }
        let changes_results =
            filter::normalize_query(&text) != filter::normalize_query(&self.selection.search_text);
        self.selection.search_text = text;
        if changes_results {
            self.selection.page = 1;
            self.recompute();
        }
        self.publish();
        true
    }

    /// Rebuild the view from the committed selection, clamping the page
    fn recompute(&mut self) {
        let tags = self.selection.selected_tags.as_slice();
        let query = self.selection.search_text.as_str();

        let (filtered, disabled): (Vec<Drill>, BTreeSet<String>) = match &self.index {
            Some(index) => {
                let base: BTreeSet<usize> = match filter::normalize_query(query) {
                    Some(needle) => self
                        .drills
                        .iter()
                        .enumerate()
                        .filter(|(_, drill)| filter::matches_normalized(drill, &needle))
                        .map(|(position, _)| position)
                        .collect(),
                    None => (0..self.drills.len()).collect(),
                };
                let filtered = index
                    .matching(tags)
                    .intersection(&base)
                    .map(|&position| self.drills[position].clone())
                    .collect();
                (filtered, index.disabled_tags(&base, tags, &self.vocabulary))
            }
            None => {
                let base = self.drills.iter().cloned().filter_text(query);
                let disabled = filter::disabled_tags(&base, tags, &self.vocabulary);
                (base.filter_tags(tags), disabled)
            }
        };

        self.view = ResultView::new(filtered, disabled, self.selection.page, self.settings.page_size);
        self.selection.page = self.view.page;
        debug!(
            results = self.view.result_count(),
            disabled = self.view.disabled_tags.len(),
            page = self.view.page,
            total_pages = self.view.total_pages,
            "recomputed view"
        );
    }

    /// Write the canonical query string if it changed
    fn publish(&mut self) {
        let encoded = location::encode(&self.selection);
        if encoded != self.location {
            debug!(location = %encoded, "writing location");
            self.history.replace(&encoded);
            self.location = encoded;
        }
    }
}

/// Builder for `DiscoveryController`
///
/// ```
/// # use drillfinder::catalog::InMemoryCatalog;
/// # use drillfinder::discovery::{DiscoveryController, DiscoverySettings, MemoryHistory};
/// let history = MemoryHistory::new();
/// let controller = DiscoveryController::builder()
///     .catalog(&InMemoryCatalog::default())
///     .settings(DiscoverySettings::default())
///     .location("?tags=math&page=3")
///     .history(history.clone())
///     .build();
///
/// assert_eq!(controller.selection().selected_tags, vec!["math"]);
/// assert_eq!(controller.selection().page, 1);
/// assert_eq!(history.writes(), 0);
/// ```
pub struct DiscoveryControllerBuilder {
    drills: Vec<Drill>,
    settings: DiscoverySettings,
    location: String,
    history: Option<Box<dyn HistorySink>>,
    clock: Option<Box<dyn Clock>>,
}

impl DiscoveryControllerBuilder {
    /// Create a new builder with an empty catalog and default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            drills: Vec::new(),
            settings: DiscoverySettings::default(),
            location: String::new(),
            history: None,
            clock: None,
        }
    }

    /// Use `drills` as the session's catalog snapshot
    #[must_use]
    pub fn drills(mut self, drills: Vec<Drill>) -> Self {
        self.drills = drills;
        self
    }

    /// List `catalog` once and use the result as the snapshot
    ///
    /// A failing catalog gives an empty session.
    #[must_use]
    pub fn catalog(mut self, catalog: &impl Catalog) -> Self {
        self.drills = catalog::snapshot(catalog);
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: DiscoverySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Initial query string (e.g. from the current URL)
    #[must_use]
    pub fn location(mut self, query: impl Into<String>) -> Self {
        self.location = query.into();
        self
    }

    /// Where canonical query strings are written (default: in-memory)
    #[must_use]
    pub fn history(mut self, history: impl HistorySink + 'static) -> Self {
        self.history = Some(Box::new(history));
        self
    }

    /// Time source for the search debounce (default: wall clock)
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Build the `DiscoveryController`, deriving its state from the location
    #[must_use]
    pub fn build(self) -> DiscoveryController {
        let vocabulary = filter::extract_vocabulary(&self.drills);
        let index = (self.drills.len() > self.settings.index_threshold)
            .then(|| TagIndex::build(&self.drills));
        debug!(
            drills = self.drills.len(),
            tags = vocabulary.len(),
            indexed = index.is_some(),
            "starting discovery session"
        );

        let mut controller = DiscoveryController {
            drills: self.drills,
            vocabulary,
            index,
            pending_search: Debouncer::new(self.settings.debounce),
            settings: self.settings,
            search_input: String::new(),
            selection: SelectionState::default(),
            view: ResultView::default(),
            location: String::new(),
            history: self.history.unwrap_or_else(|| Box::new(MemoryHistory::new())),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
        };
        controller.apply_location(&self.location);
        controller
    }
}

impl Default for DiscoveryControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
