//! Single-slot debouncing of rapidly changing input
//!
//! A [`Debouncer`] holds at most one pending value. Scheduling a new value
//! replaces the old one and restarts the quiet window.
//!
//! Hosts either poll ([`Debouncer::poll`]) or arm one timer per scheduled
//! value. Every scheduled value gets a fresh [`Ticket`], and a timer fires
//! through [`Debouncer::fire`] with the ticket it was armed for; a ticket
//! that no longer names the pending value releases nothing, even if the newer
//! edit carries the same text.
//!
//! Time comes from a [`Clock`] so hosts (and tests) control when the quiet
//! window elapses.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the component under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Identity of one scheduled edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Pending<T> {
    ticket: Ticket,
    value: T,
    deadline: Instant,
}

/// Holds the latest value until it has been stable for `quiet`
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    slot: Option<Pending<T>>,
    issued: u64,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            slot: None,
            issued: 0,
        }
    }

    #[must_use]
    pub const fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Replace any pending value with `value`, due `quiet` after `now`
    pub fn schedule(&mut self, value: T, now: Instant) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.slot = Some(Pending {
            ticket,
            value,
            deadline: now + self.quiet,
        });
        ticket
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) -> Option<T> {
        self.slot.take().map(|pending| pending.value)
    }

    /// Release the pending value if its quiet window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.slot.as_ref().is_some_and(|p| p.deadline <= now);
        if due { self.cancel() } else { None }
    }

    /// Release the pending value for an armed timer
    ///
    /// Only fires when `ticket` still names the pending value and its quiet
    /// window has elapsed.
    pub fn fire(&mut self, ticket: Ticket, now: Instant) -> Option<T> {
        let due = self
            .slot
            .as_ref()
            .is_some_and(|p| p.ticket == ticket && p.deadline <= now);
        if due { self.cancel() } else { None }
    }

    /// Release the pending value immediately, ignoring the deadline
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }

    /// Ticket and deadline of the pending value, for arming a timer
    #[must_use]
    pub fn timer(&self) -> Option<(Ticket, Instant)> {
        self.slot.as_ref().map(|p| (p.ticket, p.deadline))
    }

    #[must_use]
    pub fn pending(&self) -> Option<&T> {
        self.slot.as_ref().map(|p| &p.value)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.slot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[test]
    fn test_releases_after_quiet_window() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.schedule("a", clock.now());
        assert_eq!(debouncer.poll(clock.now()), None);

        clock.advance(Duration::from_millis(299));
        assert_eq!(debouncer.poll(clock.now()), None);

        clock.advance(Duration::from_millis(1));
        assert_eq!(debouncer.poll(clock.now()), Some("a"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(clock.now()), None);
    }

    #[test]
    fn test_new_value_restarts_window() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.schedule("k", clock.now());
        clock.advance(Duration::from_millis(200));
        debouncer.schedule("ka", clock.now());
        clock.advance(Duration::from_millis(200));
        assert_eq!(debouncer.poll(clock.now()), None);
        assert_eq!(debouncer.pending(), Some(&"ka"));

        clock.advance(Duration::from_millis(100));
        assert_eq!(debouncer.poll(clock.now()), Some("ka"));
    }

    #[test]
    fn test_tickets_are_unique_per_edit() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(QUIET);

        let first = debouncer.schedule("same", clock.now());
        let second = debouncer.schedule("same", clock.now());
        assert_ne!(first, second);
        assert_eq!(debouncer.timer(), Some((second, clock.now() + QUIET)));
    }

    #[test]
    fn test_stale_ticket_does_not_fire() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(QUIET);

        let stale = debouncer.schedule("a", clock.now());
        clock.advance(Duration::from_millis(100));
        let current = debouncer.schedule("a", clock.now());

        clock.advance(QUIET);
        assert_eq!(debouncer.fire(stale, clock.now()), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.fire(current, clock.now()), Some("a"));
        assert_eq!(debouncer.fire(current, clock.now()), None);
    }

    #[test]
    fn test_fire_waits_for_deadline() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(QUIET);

        let ticket = debouncer.schedule(7, clock.now());
        clock.advance(Duration::from_millis(299));
        assert_eq!(debouncer.fire(ticket, clock.now()), None);
        clock.advance(Duration::from_millis(1));
        assert_eq!(debouncer.fire(ticket, clock.now()), Some(7));
        assert_eq!(debouncer.quiet(), QUIET);
    }

    #[test]
    fn test_cancel_and_flush() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.schedule(1, clock.now());
        assert_eq!(debouncer.cancel(), Some(1));
        assert_eq!(debouncer.flush(), None);

        debouncer.schedule(2, clock.now());
        assert!(debouncer.timer().is_some());
        assert_eq!(debouncer.flush(), Some(2));
        assert!(debouncer.timer().is_none());
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let start = clock.now();
        handle.advance(QUIET);
        assert_eq!(clock.now() - start, QUIET);
    }
}
