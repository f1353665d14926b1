//! Where the controller mirrors the canonical query string
//!
//! In a browser this would replace the current history entry; here it is a
//! trait so the host decides. [`MemoryHistory`] keeps the entries in memory
//! and is what the CLI and the tests use.

use std::cell::RefCell;
use std::rc::Rc;

/// Receiver of canonical query-string updates
pub trait HistorySink {
    /// Replace the current location's query string with `query`.
    fn replace(&mut self, query: &str);
}

/// In-memory history; clones share the same entries
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Rc<RefCell<Vec<String>>>,
}

impl MemoryHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every query written so far, oldest first
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.entries.borrow().last().cloned()
    }

    /// Number of writes received
    #[must_use]
    pub fn writes(&self) -> usize {
        self.entries.borrow().len()
    }
}

impl HistorySink for MemoryHistory {
    fn replace(&mut self, query: &str) {
        self.entries.borrow_mut().push(query.to_string());
    }
}
