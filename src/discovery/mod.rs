//! Discovery sessions over a drill catalog
//!
//! A [`DiscoveryController`] owns the interaction state of one session and
//! keeps three things in step:
//!
//! 1. what the user is typing or clicking right now (`search_input`),
//! 2. what the results are computed from (the committed [`SelectionState`]),
//! 3. the shareable query string, written to a [`HistorySink`].
//!
//! Tag toggles and page changes commit immediately. Search text commits
//! after it has been stable for the debounce window; clearing it commits
//! immediately. History navigation comes back in through
//! [`DiscoveryController::sync_from_location`], which never writes history.
//!
//! ```
//! use drillfinder::catalog::Drill;
//! use drillfinder::discovery::DiscoveryController;
//!
//! let drills = vec![
//!     Drill::new("1", "Addition").with_tags(["math", "grade1"]),
//!     Drill::new("2", "Kanji").with_tags(["kanji"]),
//! ];
//! let mut controller = DiscoveryController::builder().drills(drills).build();
//!
//! controller.toggle_tag("math");
//! assert_eq!(controller.current_view().result_count(), 1);
//! assert!(controller.current_view().is_disabled("kanji"));
//! assert_eq!(controller.location(), "tags=math");
//! ```

mod controller;
pub mod debounce;
pub mod history;
pub mod location;
mod selection;
mod view;

pub use controller::{DiscoveryController, DiscoveryControllerBuilder};
pub use debounce::{Clock, Debouncer, ManualClock, SystemClock, Ticket};
pub use history::{HistorySink, MemoryHistory};
pub use selection::SelectionState;
pub use view::{ResultView, total_pages};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do with selected tags that the catalog does not know
///
/// Such tags arrive from shared links made against an older catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTagPolicy {
    /// Keep them selected; they match nothing until the catalog has them
    #[default]
    Preserve,
    /// Drop them from the selection and ignore toggles of them
    Drop,
}

/// Tunables of a discovery session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverySettings {
    /// Drills per page
    pub page_size: usize,
    /// Quiet period before typed search text is committed
    pub debounce: Duration,
    pub unknown_tags: UnknownTagPolicy,
    /// Catalog size above which the inverted tag index is used
    pub index_threshold: usize,
}

pub const DEFAULT_PAGE_SIZE: usize = 24;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_INDEX_THRESHOLD: usize = 500;

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            unknown_tags: UnknownTagPolicy::default(),
            index_threshold: DEFAULT_INDEX_THRESHOLD,
        }
    }
}
