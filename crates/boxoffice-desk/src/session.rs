//! The per-session box office facade.
//!
//! One [`BoxOffice`] is a serving session: it owns its reservation queue
//! exclusively and shares the inventory store with other sessions through
//! `Arc`. Handlers are synchronous and non-blocking; callers that want
//! cross-thread sharing of one session bring their own mutual exclusion.
//!
//! Every public handler reads the wall clock once and passes the reading
//! down, so each request sees one consistent notion of "now". The `*_at`
//! variants take that reading explicitly, which is what deterministic
//! tests use.
//!
//! Read-only handlers ([`catalog`](BoxOffice::catalog),
//! [`queue_snapshot`](BoxOffice::queue_snapshot),
//! [`find_by_holder`](BoxOffice::find_by_holder),
//! [`next_due`](BoxOffice::next_due)) never purge expired entries; expiry
//! is enforced only on the payment path.

use std::sync::Arc;

use boxoffice_queue::{QueueSnapshot, ReservationQueue};
use boxoffice_store::TicketStore;
use boxoffice_types::{CatalogEntry, DeskConfig, Reservation, ReservationRequest, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::booking::BookingDesk;
use crate::settle::{self, PaymentDue, PaymentOutcome, SettlementEngine};

/// A serving session of the box office.
pub struct BoxOffice<S: TicketStore> {
    store: Arc<S>,
    queue: ReservationQueue,
    desk: BookingDesk,
    engine: SettlementEngine,
}

impl<S: TicketStore> BoxOffice<S> {
    /// Open a session over `store` with the given desk configuration.
    #[must_use]
    pub fn new(store: Arc<S>, config: &DeskConfig) -> Self {
        Self {
            store,
            queue: ReservationQueue::new(),
            desk: BookingDesk::new(config),
            engine: SettlementEngine::new(config),
        }
    }

    /// Browse rows: unit price and remaining capacity per
    /// (concert, category), in catalog order.
    pub fn catalog(&self) -> Result<Vec<CatalogEntry>> {
        self.store.listings()
    }

    /// Take a reservation into the payment queue.
    pub fn reserve(&mut self, request: &ReservationRequest) -> Result<Reservation> {
        self.reserve_at(request, Utc::now())
    }

    /// [`reserve`](Self::reserve) with an explicit clock reading.
    pub fn reserve_at(
        &mut self,
        request: &ReservationRequest,
        now: DateTime<Utc>,
    ) -> Result<Reservation> {
        self.desk
            .reserve(&mut self.queue, self.store.as_ref(), request, now)
    }

    /// Process a payment against the head of the queue.
    pub fn pay(&mut self, tendered: Decimal) -> Result<PaymentOutcome> {
        self.pay_at(tendered, Utc::now())
    }

    /// [`pay`](Self::pay) with an explicit clock reading.
    pub fn pay_at(&mut self, tendered: Decimal, now: DateTime<Utc>) -> Result<PaymentOutcome> {
        self.engine
            .process_payment(&mut self.queue, self.store.as_ref(), tendered, now)
    }

    /// The reservation currently holding the payment slot, with its
    /// remaining time. Read-only; an expired head still shows here.
    #[must_use]
    pub fn next_due(&self) -> Option<PaymentDue> {
        self.next_due_at(Utc::now())
    }

    /// [`next_due`](Self::next_due) with an explicit clock reading.
    #[must_use]
    pub fn next_due_at(&self, now: DateTime<Utc>) -> Option<PaymentDue> {
        settle::next_due(&self.queue, now)
    }

    /// Display snapshot of the payment queue. Read-only, never purges.
    #[must_use]
    pub fn queue_snapshot(&self) -> QueueSnapshot {
        self.queue.snapshot()
    }

    /// Pending reservations held under `name`, matched case-insensitively,
    /// in queue order. Read-only, never purges.
    #[must_use]
    pub fn find_by_holder(&self, name: &str) -> Vec<Reservation> {
        self.queue
            .find_by_holder(name)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Number of reservations waiting in this session's queue.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use boxoffice_store::MemoryTicketStore;

    use super::*;

    fn make_request(holder: &str, category: &str, quantity: u32) -> ReservationRequest {
        ReservationRequest {
            holder: holder.to_string(),
            concert: "Jazz Night".to_string(),
            category: category.to_string(),
            quantity,
        }
    }

    #[test]
    fn sessions_share_the_store_but_not_the_queue() {
        let store = Arc::new(MemoryTicketStore::demo());
        let config = DeskConfig::default();
        let mut session_a = BoxOffice::new(Arc::clone(&store), &config);
        let mut session_b = BoxOffice::new(Arc::clone(&store), &config);

        session_a.reserve(&make_request("Ana", "VIP", 1)).unwrap();
        session_b.reserve(&make_request("Budi", "Regular", 1)).unwrap();

        assert_eq!(session_a.pending(), 1);
        assert_eq!(session_b.pending(), 1);
        assert!(session_a.find_by_holder("budi").is_empty());

        // One catalog view for everyone.
        assert_eq!(session_a.catalog().unwrap().len(), 4);
        assert_eq!(session_b.catalog().unwrap().len(), 4);
    }

    #[test]
    fn catalog_reflects_settlements() {
        let store = Arc::new(MemoryTicketStore::demo());
        let mut session = BoxOffice::new(Arc::clone(&store), &DeskConfig::default());

        session.reserve(&make_request("Ana", "VIP", 2)).unwrap();
        session.pay(Decimal::new(500_000, 0)).unwrap();

        let rows = session.catalog().unwrap();
        let vip = rows
            .iter()
            .find(|row| row.concert == "Jazz Night" && row.category == "VIP")
            .unwrap();
        assert_eq!(vip.remaining, 48);
    }
}
