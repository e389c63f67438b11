//! FIFO payment queue for pending reservations.
//!
//! The queue is two things at once: a work queue whose head is the single
//! active payment slot, and a searchable collection browsed by holder
//! name. Entries live in strict arrival order. Expiry removes entries from
//! the head only; an expired entry sitting behind a live head keeps its
//! place until it surfaces, because only one payment window is open at a
//! time.
//!
//! A queue is exclusively owned by one serving session. The API is
//! `&mut self` with no internal locking; callers that share a queue across
//! threads bring their own mutual exclusion.

use std::collections::VecDeque;

use boxoffice_types::{BoxofficeError, Reservation, Result, TicketNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display snapshot of the queue.
///
/// The empty queue is an explicit marker variant, not an error and not an
/// empty list, so callers can render "no pending reservations" distinctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum QueueSnapshot {
    /// The queue has no entries.
    Empty,
    /// Pending reservations, head first.
    Waiting(Vec<Reservation>),
}

impl QueueSnapshot {
    /// Number of reservations captured in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Waiting(entries) => entries.len(),
        }
    }

    /// Whether this is the empty marker.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// FIFO queue of pending reservations with head-only expiry.
///
/// Invariants:
/// - entries are stored in arrival order, no reordering ever
/// - at most one entry per ticket number
/// - entries leave only from the head (settlement or expiry purge)
#[derive(Debug, Default)]
pub struct ReservationQueue {
    /// Front is the head: the next reservation to be paid.
    entries: VecDeque<Reservation>,
}

impl ReservationQueue {
    /// New empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Append a reservation at the tail.
    ///
    /// Capacity is deliberately not checked here: nothing is reserved
    /// against inventory at intake, so the queue can admit more demand
    /// than remaining capacity. That shortfall surfaces at settlement.
    ///
    /// # Errors
    /// [`BoxofficeError::TicketPending`] when a reservation with the same
    /// ticket number is already waiting.
    pub fn enqueue(&mut self, reservation: Reservation) -> Result<()> {
        if self.contains_ticket(&reservation.ticket) {
            return Err(BoxofficeError::TicketPending(reservation.ticket));
        }
        self.entries.push_back(reservation);
        Ok(())
    }

    /// Remove and return the head, or `None` on an empty queue.
    pub fn dequeue(&mut self) -> Option<Reservation> {
        self.entries.pop_front()
    }

    /// The head, without removing it.
    #[must_use]
    pub fn peek_head(&self) -> Option<&Reservation> {
        self.entries.front()
    }

    /// Drop expired entries from the head, stopping at the first live one.
    ///
    /// While the head's deadline lies before `now`, it is dequeued and
    /// discarded. Entries behind a live head are never purged here even if
    /// their own deadlines have passed; they are re-examined when they
    /// reach the head. Purging has no settlement side effects: capacity
    /// was never taken at intake, so nothing is released.
    ///
    /// Returns the purged entries, head first, for the caller to log.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> Vec<Reservation> {
        let mut purged = Vec::new();
        while self
            .entries
            .front()
            .is_some_and(|head| head.is_expired(now))
        {
            if let Some(expired) = self.entries.pop_front() {
                purged.push(expired);
            }
        }
        purged
    }

    /// All reservations whose holder matches `name` case-insensitively,
    /// in queue order.
    #[must_use]
    pub fn find_by_holder(&self, name: &str) -> Vec<&Reservation> {
        let needle = name.to_lowercase();
        self.entries
            .iter()
            .filter(|reservation| reservation.holder.to_lowercase() == needle)
            .collect()
    }

    /// Display snapshot: the [`QueueSnapshot::Empty`] marker, or the
    /// entries head first. Read-only; never purges.
    #[must_use]
    pub fn snapshot(&self) -> QueueSnapshot {
        if self.entries.is_empty() {
            QueueSnapshot::Empty
        } else {
            QueueSnapshot::Waiting(self.entries.iter().cloned().collect())
        }
    }

    /// Whether a reservation with this ticket number is waiting.
    #[must_use]
    pub fn contains_ticket(&self, ticket: &TicketNumber) -> bool {
        self.entries
            .iter()
            .any(|reservation| reservation.ticket == *ticket)
    }

    /// Number of pending reservations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
