//! Payment settlement.
//!
//! Settlement serves one payment window at a time: only the head of the
//! queue can be paid. Each attempt first purges expired heads (the only
//! place expiry is enforced), then validates the tendered amount, then
//! commits.
//!
//! The commit order is the engine's crash-consistency rule: decrement
//! capacity, append the purchase record, and only then dequeue. A failure
//! between the writes leaves the reservation at the head, so a retry
//! re-attempts the decrement rather than losing the sale; there is no
//! compensation path because capacity is never incremented.
//!
//! At-most-once settlement per ticket number is enforced in layers: a
//! bounded in-process guard, an early check against the durable purchase
//! count, and the store's own sequence check inside the append, which two
//! sessions racing the same number cannot both pass.

use boxoffice_queue::ReservationQueue;
use boxoffice_store::TicketStore;
use boxoffice_types::{
    BoxofficeError, DeskConfig, Purchase, Reservation, ReservationState, Result,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::guard::SettledGuard;
use crate::numbering::next_ticket_number;

/// Result of a payment attempt that did not error.
#[derive(Debug, Clone)]
pub enum PaymentOutcome {
    /// Payment accepted and fully committed.
    Accepted {
        /// The purchase record written to the store.
        purchase: Purchase,
        /// Tendered amount minus the total price.
        change: Decimal,
        /// Time the head had left on its deadline when payment was taken.
        /// Informational only; deadline enforcement happens in the purge
        /// step, never mid-settlement.
        remaining_at_payment: chrono::Duration,
    },
    /// Nothing left to settle once expired heads were purged. A valid
    /// idle signal, not an error.
    QueueEmpty,
}

/// Head-of-queue view shown before taking payment.
#[derive(Debug, Clone)]
pub struct PaymentDue {
    /// The reservation currently holding the payment slot.
    pub reservation: Reservation,
    /// Time left on its deadline, zero once passed.
    pub remaining: chrono::Duration,
}

/// The head and its remaining time, without purging.
///
/// Read-only by design: an expired head still shows here (with zero
/// remaining) until the next settlement attempt removes it.
#[must_use]
pub fn next_due(queue: &ReservationQueue, now: DateTime<Utc>) -> Option<PaymentDue> {
    queue.peek_head().map(|head| PaymentDue {
        reservation: head.clone(),
        remaining: head.time_remaining(now),
    })
}

/// Settles payments against the head of a reservation queue.
pub struct SettlementEngine {
    guard: SettledGuard,
}

impl SettlementEngine {
    /// Engine with the settled-guard capacity from `config`.
    #[must_use]
    pub fn new(config: &DeskConfig) -> Self {
        Self {
            guard: SettledGuard::new(config.settled_cache),
        }
    }

    /// Process a payment of `tendered` against the queue head.
    ///
    /// In order: purge expired heads; report
    /// [`PaymentOutcome::QueueEmpty`] if nothing remains; verify the head
    /// has not already settled; reject an underpayment with all state
    /// unchanged; then commit capacity, purchase record, and dequeue.
    ///
    /// # Errors
    /// - [`BoxofficeError::TicketAlreadySettled`] when the head's number
    ///   has already completed settlement (here or in another session)
    /// - [`BoxofficeError::InsufficientPayment`] when `tendered` is below
    ///   the total price; queue and inventory unchanged, retryable
    /// - [`BoxofficeError::InsufficientCapacity`] or
    ///   [`BoxofficeError::Persistence`] from the store, with the
    ///   reservation left at the head for retry
    pub fn process_payment<S: TicketStore + ?Sized>(
        &mut self,
        queue: &mut ReservationQueue,
        store: &S,
        tendered: Decimal,
        now: DateTime<Utc>,
    ) -> Result<PaymentOutcome> {
        for expired in queue.purge_expired(now) {
            info!(
                ticket = %expired.ticket,
                holder = %expired.holder,
                deadline = %expired.deadline,
                state = %ReservationState::Expired,
                "reservation expired before payment, slot released"
            );
        }

        let Some(head) = queue.peek_head() else {
            return Ok(PaymentOutcome::QueueEmpty);
        };

        let remaining = head.time_remaining(now);
        info!(
            ticket = %head.ticket,
            holder = %head.holder,
            total = %head.total_price,
            remaining_min = remaining.num_seconds() / 60,
            remaining_sec = remaining.num_seconds() % 60,
            "taking payment for queue head"
        );

        if self.guard.is_settled(&head.ticket) {
            return Err(BoxofficeError::TicketAlreadySettled(head.ticket.clone()));
        }

        // Durable at-most-once check. The head's number was composed from
        // the purchase count at intake; if the count has moved since,
        // another session settled that sequence and this number is burnt.
        let expected = next_ticket_number(store, &head.concert, &head.category)?;
        if expected != head.ticket {
            warn!(
                ticket = %head.ticket,
                expected = %expected,
                "ticket number already settled elsewhere, rejecting head"
            );
            return Err(BoxofficeError::TicketAlreadySettled(head.ticket.clone()));
        }

        if tendered < head.total_price {
            warn!(
                ticket = %head.ticket,
                required = %head.total_price,
                tendered = %tendered,
                "payment rejected, reservation stays at head"
            );
            return Err(BoxofficeError::InsufficientPayment {
                required: head.total_price,
                tendered,
            });
        }

        let change = tendered - head.total_price;

        // Commit order: capacity, purchase record, then dequeue. The entry
        // stays queued until both writes have succeeded.
        store.decrement_capacity(&head.concert, &head.category, head.quantity)?;
        let purchase = Purchase::from_reservation(head, now);
        store.record_purchase(&purchase)?;

        queue.dequeue();
        self.guard.mark_settled(purchase.ticket.clone());
        info!(
            ticket = %purchase.ticket,
            holder = %purchase.holder,
            total = %purchase.total_price,
            change = %change,
            state = %ReservationState::Settled,
            "settlement committed"
        );

        Ok(PaymentOutcome::Accepted {
            purchase,
            change,
            remaining_at_payment: remaining,
        })
    }
}
