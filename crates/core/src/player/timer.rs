//! Virtual-clock timer queue.
//!
//! The player never sleeps. It schedules actions on a [`TimerQueue`] and
//! whoever drives it (a test, the CLI, the async runtime) moves the clock
//! forward. Timers due at the same instant fire in scheduling order.

use std::collections::BTreeMap;

/// Pending timers keyed by `(due, sequence)`.
#[derive(Debug)]
pub struct TimerQueue<A> {
    now: u64,
    next_seq: u64,
    entries: BTreeMap<(u64, u64), A>,
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Current clock value.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `action` to fire `delay` units from now.
    ///
    /// Returns the absolute due time.
    pub fn schedule(&mut self, delay: u64, action: A) -> u64 {
        let due = self.now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((due, seq), action);
        due
    }

    /// Due time of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.keys().next().map(|(due, _)| *due)
    }

    /// Remove and return the earliest timer if it is due at or before `until`.
    ///
    /// The clock moves to the popped timer's due time.
    pub fn pop_due(&mut self, until: u64) -> Option<(u64, A)> {
        let (&(due, seq), _) = self.entries.first_key_value()?;
        if due > until {
            return None;
        }
        let action = self.entries.remove(&(due, seq))?;
        self.now = self.now.max(due);
        Some((due, action))
    }

    /// Move the clock forward to `to`. Never moves it backwards.
    pub fn set_now(&mut self, to: u64) {
        self.now = self.now.max(to);
    }

    /// Cancel every pending timer, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let cancelled = self.entries.len();
        self.entries.clear();
        cancelled
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}
