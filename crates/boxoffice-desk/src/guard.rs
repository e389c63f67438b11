//! Settled-ticket guard.
//!
//! An in-process backstop for at-most-once settlement: every ticket number
//! that completes settlement is remembered here, and the engine refuses to
//! settle a number it has seen before. The set is bounded with oldest-first
//! eviction so long-running sessions keep a predictable footprint.
//!
//! The durable purchase history remains the source of truth across
//! processes; this guard is the cheap first line that needs no store
//! round-trip.

use std::collections::{HashSet, VecDeque};

use boxoffice_types::TicketNumber;

/// Bounded set of ticket numbers that have completed settlement.
///
/// The engine checks [`is_settled`](Self::is_settled) before touching
/// inventory and calls [`mark_settled`](Self::mark_settled) only after the
/// dequeue. Marking earlier would strand a head whose capacity write
/// failed mid-settlement.
pub struct SettledGuard {
    /// Numbers that have completed settlement.
    settled: HashSet<TicketNumber>,
    /// Insertion order for eviction; front is oldest.
    order: VecDeque<TicketNumber>,
    /// Maximum entries retained.
    max_size: usize,
}

impl SettledGuard {
    /// Guard remembering up to `max_size` ticket numbers.
    ///
    /// # Panics
    /// Panics if `max_size` is zero: a guard that remembers nothing cannot
    /// enforce anything.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        assert!(max_size > 0, "SettledGuard max_size must be greater than zero");
        Self {
            settled: HashSet::with_capacity(max_size),
            order: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Whether this ticket number has already completed settlement.
    #[must_use]
    pub fn is_settled(&self, ticket: &TicketNumber) -> bool {
        self.settled.contains(ticket)
    }

    /// Record a completed settlement, evicting the oldest entry when at
    /// capacity. Re-marking an already-known number is a no-op.
    pub fn mark_settled(&mut self, ticket: TicketNumber) {
        if self.settled.contains(&ticket) {
            return;
        }
        if self.settled.len() >= self.max_size {
            if let Some(oldest) = self.order.pop_front() {
                self.settled.remove(&oldest);
            }
        }
        self.settled.insert(ticket.clone());
        self.order.push_back(ticket);
    }

    /// Number of remembered ticket numbers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.settled.len()
    }

    /// Whether nothing has been marked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(sequence: u64) -> TicketNumber {
        TicketNumber::compose("Jazz Night", "VIP", sequence)
    }

    #[test]
    fn marks_and_detects_settled_tickets() {
        let mut guard = SettledGuard::new(8);
        assert!(!guard.is_settled(&ticket(1)));

        guard.mark_settled(ticket(1));
        assert!(guard.is_settled(&ticket(1)));
        assert!(!guard.is_settled(&ticket(2)));
    }

    #[test]
    fn re_marking_is_a_no_op() {
        let mut guard = SettledGuard::new(8);
        guard.mark_settled(ticket(1));
        guard.mark_settled(ticket(1));
        assert_eq!(guard.len(), 1);
    }

    #[test]
    fn evicts_oldest_at_capacity() {
        let mut guard = SettledGuard::new(3);
        guard.mark_settled(ticket(1));
        guard.mark_settled(ticket(2));
        guard.mark_settled(ticket(3));
        guard.mark_settled(ticket(4));

        assert_eq!(guard.len(), 3);
        assert!(!guard.is_settled(&ticket(1)));
        assert!(guard.is_settled(&ticket(2)));
        assert!(guard.is_settled(&ticket(4)));
    }

    #[test]
    #[should_panic(expected = "max_size must be greater than zero")]
    fn zero_capacity_panics() {
        let _ = SettledGuard::new(0);
    }
}
