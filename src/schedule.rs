//! Deferred phase steps on a virtual clock.
//!
//! Anything that happens "after a moment" (the opponent thinking, the
//! battle reveal, each attack pass) is queued as a `Continuation` with a
//! delay in milliseconds. Nothing runs on its own: the owner advances the
//! clock and executes whatever falls due, in due-time order with ties
//! broken by scheduling order. Cancelling drops every queued step.
//!
//! ```
//! use lane_ccg::schedule::{Continuation, Scheduler};
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.schedule(1000, Continuation::BeginBattle);
//!
//! assert!(scheduler.pop_due(999).is_none());
//! assert_eq!(scheduler.pop_due(1000), Some(Continuation::BeginBattle));
//! assert_eq!(scheduler.now(), 1000);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::phase::AttackStage;

/// A deferred step of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continuation {
    /// The opponent takes its placement turn.
    OpponentTurn,
    /// Reveal all lanes and queue the first attack pass.
    BeginBattle,
    /// Run one attack pass.
    AttackPass(AttackStage),
}

#[derive(Clone, Debug)]
struct Entry {
    due: u64,
    seq: u64,
    continuation: Continuation,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap yields the earliest entry.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Virtual-clock queue of continuations.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_seq: u64,
    queue: BinaryHeap<Entry>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Queue `continuation` to run `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, continuation: Continuation) {
        let due = self.now.saturating_add(delay_ms);
        log::trace!("scheduled {continuation:?} at t={due}ms");
        self.queue.push(Entry {
            due,
            seq: self.next_seq,
            continuation,
        });
        self.next_seq += 1;
    }

    /// Number of queued continuations.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the earliest queued continuation.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|e| e.due)
    }

    /// Pop the earliest continuation if it is due by `until`, moving the
    /// clock to its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<Continuation> {
        if self.next_due()? > until {
            return None;
        }
        let entry = self.queue.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry.continuation)
    }

    /// Pop the earliest continuation regardless of its due time.
    pub fn pop_next(&mut self) -> Option<Continuation> {
        let due = self.next_due()?;
        self.pop_due(due)
    }

    /// Move the clock forward without running anything.
    pub fn advance_to(&mut self, time: u64) {
        self.now = self.now.max(time);
    }

    /// Drop every queued continuation, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        if dropped > 0 {
            log::debug!("cancelled {dropped} scheduled step(s)");
        }
        dropped
    }
}
