//! End-to-end integration tests across the box office planes.
//!
//! These tests exercise the full reservation lifecycle:
//! intake (`BookingDesk`) -> `ReservationQueue` -> settlement engine ->
//! `TicketStore`
//!
//! They verify the planes work together in realistic scenarios: reserve
//! and pay with change, queue-order settlement, deadline expiry, oversell
//! surfacing, holder search, and at-most-once settlement across sessions
//! sharing one store.

use std::sync::Arc;

use boxoffice_desk::{BoxOffice, PaymentOutcome};
use boxoffice_queue::QueueSnapshot;
use boxoffice_store::{MemoryTicketStore, TicketStore};
use boxoffice_types::*;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

/// One session over a freshly seeded demo store.
fn demo_session() -> (BoxOffice<MemoryTicketStore>, Arc<MemoryTicketStore>, DateTime<Utc>) {
    let store = Arc::new(MemoryTicketStore::demo());
    let session = BoxOffice::new(Arc::clone(&store), &DeskConfig::default());
    (session, store, Utc::now())
}

/// Additional session over an existing store.
fn open_session(store: &Arc<MemoryTicketStore>) -> BoxOffice<MemoryTicketStore> {
    BoxOffice::new(Arc::clone(store), &DeskConfig::default())
}

fn request(holder: &str, concert: &str, category: &str, quantity: u32) -> ReservationRequest {
    ReservationRequest {
        holder: holder.to_string(),
        concert: concert.to_string(),
        category: category.to_string(),
        quantity,
    }
}

/// Unwrap an accepted payment into (purchase, change).
fn accepted(outcome: PaymentOutcome) -> (Purchase, Decimal) {
    match outcome {
        PaymentOutcome::Accepted { purchase, change, .. } => (purchase, change),
        PaymentOutcome::QueueEmpty => panic!("expected an accepted payment, queue was empty"),
    }
}

/// A one-category store with a small capacity, for oversell scenarios.
fn club_gig_store(capacity: u32) -> Arc<MemoryTicketStore> {
    Arc::new(MemoryTicketStore::from_configs(&[ConcertConfig {
        name: "Club Gig".to_string(),
        categories: vec![CategoryConfig {
            name: "Floor".to_string(),
            price: Decimal::new(50_000, 0),
            capacity,
        }],
    }]))
}

// =============================================================================
// Test: Reserve, pay with change, verify every committed effect
// =============================================================================
#[test]
fn e2e_reserve_then_settle_with_change() {
    let (mut session, store, now) = demo_session();

    let reservation = session
        .reserve_at(&request("Budi", "Jazz Night", "Regular", 2), now)
        .expect("reserve should succeed");
    assert_eq!(reservation.ticket.as_str(), "JAZ-REG-0001");
    assert_eq!(reservation.total_price, Decimal::new(200_000, 0));
    assert_eq!(reservation.deadline, now + Duration::seconds(300));

    let outcome = session
        .pay_at(Decimal::new(250_000, 0), now + Duration::seconds(30))
        .expect("payment should settle");
    let (purchase, change) = accepted(outcome);

    assert_eq!(purchase.holder, "Budi");
    assert_eq!(purchase.ticket, reservation.ticket);
    assert_eq!(purchase.total_price, Decimal::new(200_000, 0));
    assert_eq!(change, Decimal::new(50_000, 0), "250k tendered for a 200k total");

    // Committed effects: capacity down by 2, one history row, empty queue.
    assert_eq!(store.remaining_capacity("Jazz Night", "Regular").unwrap(), 198);
    assert_eq!(store.purchase_count("Jazz Night", "Regular").unwrap(), 1);
    assert!(session.queue_snapshot().is_empty());
}

// =============================================================================
// Test: Ticket numbering follows durable purchase history
// =============================================================================
#[test]
fn e2e_ticket_numbers_follow_purchase_history() {
    let (mut session, _store, now) = demo_session();

    // Settle three VIP purchases back to back.
    for sequence in 1..=3 {
        let reservation = session
            .reserve_at(&request("Ana", "Jazz Night", "VIP", 1), now)
            .expect("reserve should succeed");
        assert_eq!(
            reservation.ticket,
            TicketNumber::compose("Jazz Night", "VIP", sequence)
        );
        session
            .pay_at(Decimal::new(250_000, 0), now)
            .expect("payment should settle");
    }

    // Three purchases on record: the next number is JAZ-VIP-0004.
    let reservation = session
        .reserve_at(&request("Budi", "Jazz Night", "VIP", 1), now)
        .expect("reserve should succeed");
    assert_eq!(reservation.ticket.as_str(), "JAZ-VIP-0004");
}

// =============================================================================
// Test: Settlement strictly follows arrival order
// =============================================================================
#[test]
fn e2e_fifo_settlement_order() {
    let (mut session, store, now) = demo_session();

    session
        .reserve_at(&request("Ana", "Jazz Night", "VIP", 1), now)
        .unwrap();
    session
        .reserve_at(&request("Budi", "Jazz Night", "Regular", 1), now)
        .unwrap();
    session
        .reserve_at(&request("Citra", "Rock Festival", "VIP", 1), now)
        .unwrap();

    let amounts = [
        Decimal::new(250_000, 0),
        Decimal::new(100_000, 0),
        Decimal::new(350_000, 0),
    ];
    let mut settled = Vec::new();
    for amount in amounts {
        let (purchase, _) = accepted(session.pay_at(amount, now).unwrap());
        settled.push(purchase.holder);
    }

    assert_eq!(settled, ["Ana", "Budi", "Citra"], "arrival order must hold");
    assert_eq!(store.purchases().unwrap().len(), 3);
}

// =============================================================================
// Test: Underpayment leaves the head in place until covered
// =============================================================================
#[test]
fn e2e_underpayment_keeps_head_until_covered() {
    let (mut session, store, now) = demo_session();
    session
        .reserve_at(&request("Budi", "Jazz Night", "Regular", 2), now)
        .unwrap();

    // Two failed attempts: no dequeue, no capacity change, no history.
    for tendered in [Decimal::new(100_000, 0), Decimal::new(199_999, 0)] {
        let err = session.pay_at(tendered, now).unwrap_err();
        assert!(matches!(err, BoxofficeError::InsufficientPayment { .. }));
        assert_eq!(session.pending(), 1, "head must stay queued");
        assert_eq!(store.remaining_capacity("Jazz Night", "Regular").unwrap(), 200);
        assert_eq!(store.purchase_count("Jazz Night", "Regular").unwrap(), 0);
    }

    // Exact amount settles the same reservation.
    let (purchase, change) = accepted(session.pay_at(Decimal::new(200_000, 0), now).unwrap());
    assert_eq!(purchase.holder, "Budi");
    assert_eq!(change, Decimal::ZERO);
    assert_eq!(store.remaining_capacity("Jazz Night", "Regular").unwrap(), 198);
}

// =============================================================================
// Test: Expiry releases the slot with zero side effects
// =============================================================================
#[test]
fn e2e_expiry_releases_slot_without_side_effects() {
    let (mut session, store, now) = demo_session();
    session
        .reserve_at(&request("Ana", "Jazz Night", "VIP", 2), now)
        .unwrap();

    // One second past the deadline. Read-only views still show the entry.
    let late = now + Duration::seconds(301);
    assert_eq!(session.queue_snapshot().len(), 1);
    let due = session.next_due_at(late).expect("head still visible");
    assert_eq!(due.remaining, Duration::zero());

    // The payment path purges it; there is nothing left to settle.
    let outcome = session.pay_at(Decimal::new(500_000, 0), late).unwrap();
    assert!(matches!(outcome, PaymentOutcome::QueueEmpty));

    // No settlement happened: capacity and history are untouched.
    assert!(session.queue_snapshot().is_empty());
    assert_eq!(store.remaining_capacity("Jazz Night", "VIP").unwrap(), 50);
    assert_eq!(store.purchase_count("Jazz Night", "VIP").unwrap(), 0);
}

// =============================================================================
// Test: An expired head shields the live entry behind it until payment
// =============================================================================
#[test]
fn e2e_expired_head_shields_waiting_entry() {
    let (mut session, store, now) = demo_session();

    session
        .reserve_at(&request("Ana", "Jazz Night", "VIP", 1), now)
        .unwrap();
    session
        .reserve_at(&request("Ben", "Jazz Night", "Regular", 1), now + Duration::seconds(200))
        .unwrap();

    // Ana expired at now+300; Ben lives until now+500. Read-only search
    // still sees Ben behind the expired head.
    let at = now + Duration::seconds(350);
    let found = session.find_by_holder("ben");
    assert_eq!(found.len(), 1);
    assert_eq!(session.pending(), 2, "no purge outside the payment path");

    // Paying purges Ana and settles Ben in one pass.
    let (purchase, _) = accepted(session.pay_at(Decimal::new(100_000, 0), at).unwrap());
    assert_eq!(purchase.holder, "Ben");
    assert_eq!(store.remaining_capacity("Jazz Night", "VIP").unwrap(), 50, "Ana left no trace");
    assert_eq!(store.remaining_capacity("Jazz Night", "Regular").unwrap(), 199);
}

// =============================================================================
// Test: Holder search is case-insensitive and order-preserving
// =============================================================================
#[test]
fn e2e_case_insensitive_holder_search() {
    let (mut session, _store, now) = demo_session();

    session
        .reserve_at(&request("Alice", "Jazz Night", "VIP", 1), now)
        .unwrap();
    session
        .reserve_at(&request("Budi", "Jazz Night", "Regular", 1), now)
        .unwrap();
    session
        .reserve_at(&request("ALICE", "Rock Festival", "VIP", 2), now)
        .unwrap();

    for needle in ["alice", "ALICE", "aLiCe"] {
        let found = session.find_by_holder(needle);
        assert_eq!(found.len(), 2, "both of Alice's reservations match {needle:?}");
        assert_eq!(found[0].concert, "Jazz Night");
        assert_eq!(found[1].concert, "Rock Festival");
    }
    assert!(session.find_by_holder("alic").is_empty(), "no substring matching");
}

// =============================================================================
// Test: Browse views never purge; the empty queue is an explicit marker
// =============================================================================
#[test]
fn e2e_browse_views_never_purge() {
    let (mut session, _store, now) = demo_session();
    assert!(matches!(session.queue_snapshot(), QueueSnapshot::Empty));

    session
        .reserve_at(&request("Ana", "Jazz Night", "VIP", 1), now)
        .unwrap();

    // Long past the deadline, every read-only view still shows the entry.
    let late = now + Duration::seconds(900);
    match session.queue_snapshot() {
        QueueSnapshot::Waiting(entries) => assert_eq!(entries[0].holder, "Ana"),
        QueueSnapshot::Empty => panic!("read-only snapshot must not purge"),
    }
    assert_eq!(session.find_by_holder("ana").len(), 1);
    assert!(session.next_due_at(late).is_some());
    session.catalog().unwrap();
    assert_eq!(session.pending(), 1);

    // Only the payment path purges.
    let outcome = session.pay_at(Decimal::new(250_000, 0), late).unwrap();
    assert!(matches!(outcome, PaymentOutcome::QueueEmpty));
    assert!(matches!(session.queue_snapshot(), QueueSnapshot::Empty));
}

// =============================================================================
// Test: A pending pair cannot be reserved twice
// =============================================================================
#[test]
fn e2e_duplicate_pending_pair_rejected() {
    let (mut session, _store, now) = demo_session();

    session
        .reserve_at(&request("Ana", "Jazz Night", "VIP", 1), now)
        .unwrap();

    // Same pair while the first is unpaid: the number would collide.
    let err = session
        .reserve_at(&request("Budi", "Jazz Night", "VIP", 3), now)
        .unwrap_err();
    assert!(matches!(err, BoxofficeError::TicketPending(_)));

    // Once the first settles, the pair opens up under the next sequence.
    accepted(session.pay_at(Decimal::new(250_000, 0), now).unwrap());
    let reservation = session
        .reserve_at(&request("Budi", "Jazz Night", "VIP", 3), now)
        .unwrap();
    assert_eq!(reservation.ticket.as_str(), "JAZ-VIP-0002");
}

// =============================================================================
// Test: Oversell admits freely at intake, surfaces at settlement
// =============================================================================
#[test]
fn e2e_oversell_surfaces_at_settlement() {
    let store = club_gig_store(1);
    let mut session_a = open_session(&store);
    let mut session_b = open_session(&store);
    let now = Utc::now();

    // Both sessions admit a reservation against the single remaining unit.
    session_a
        .reserve_at(&request("Ana", "Club Gig", "Floor", 2), now)
        .expect("intake never checks capacity");
    session_b
        .reserve_at(&request("Budi", "Club Gig", "Floor", 1), now)
        .unwrap();

    // Ana's two tickets cannot be covered; her head stays for retry.
    let err = session_a.pay_at(Decimal::new(100_000, 0), now).unwrap_err();
    assert!(matches!(
        err,
        BoxofficeError::InsufficientCapacity { requested: 2, remaining: 1, .. }
    ));
    assert_eq!(session_a.pending(), 1);

    // Budi's single ticket fits and drains the category.
    let (purchase, _) = accepted(session_b.pay_at(Decimal::new(50_000, 0), now).unwrap());
    assert_eq!(purchase.holder, "Budi");
    assert_eq!(store.remaining_capacity("Club Gig", "Floor").unwrap(), 0);

    // Budi's settlement advanced the pair sequence, so Ana's held number
    // is stale: the retry is rejected before capacity is even consulted.
    // Remaining capacity never goes negative.
    let err = session_a.pay_at(Decimal::new(100_000, 0), now).unwrap_err();
    assert!(matches!(err, BoxofficeError::TicketAlreadySettled(_)));
    assert_eq!(session_a.pending(), 1, "the rejected head stays queued until expiry");
    assert_eq!(store.remaining_capacity("Club Gig", "Floor").unwrap(), 0);
    assert_eq!(store.purchases().unwrap().len(), 1, "only Budi's settlement on record");
}

// =============================================================================
// Test: The same ticket number cannot enter history twice
// =============================================================================
#[test]
fn e2e_same_number_cannot_settle_twice_across_sessions() {
    let store = club_gig_store(10);
    let mut session_a = open_session(&store);
    let mut session_b = open_session(&store);
    let now = Utc::now();

    // Each session owns its queue, so both compose CLU-FLO-0001 from the
    // same (empty) history.
    let in_a = session_a
        .reserve_at(&request("Ana", "Club Gig", "Floor", 1), now)
        .unwrap();
    let in_b = session_b
        .reserve_at(&request("Budi", "Club Gig", "Floor", 1), now)
        .unwrap();
    assert_eq!(in_a.ticket, in_b.ticket);

    // First settlement wins.
    accepted(session_a.pay_at(Decimal::new(50_000, 0), now).unwrap());

    // The second session's head carries a burnt number and is rejected.
    let err = session_b.pay_at(Decimal::new(50_000, 0), now).unwrap_err();
    assert!(matches!(err, BoxofficeError::TicketAlreadySettled(_)));

    let history = store.purchases().unwrap();
    assert_eq!(history.len(), 1, "exactly one CLU-FLO-0001 in history");
    assert_eq!(history[0].holder, "Ana");
    assert_eq!(store.remaining_capacity("Club Gig", "Floor").unwrap(), 9);
}

// =============================================================================
// Test: Short names compose with their full text
// =============================================================================
#[test]
fn e2e_short_names_compose_full_prefix() {
    let store = Arc::new(MemoryTicketStore::from_configs(&[ConcertConfig {
        name: "Yo".to_string(),
        categories: vec![CategoryConfig {
            name: "GA".to_string(),
            price: Decimal::new(25_000, 0),
            capacity: 100,
        }],
    }]));
    let mut session = open_session(&store);
    let now = Utc::now();

    let reservation = session
        .reserve_at(&request("Ana", "Yo", "GA", 1), now)
        .unwrap();
    assert_eq!(reservation.ticket.as_str(), "YO-GA-0001");

    let (purchase, _) = accepted(session.pay_at(Decimal::new(25_000, 0), now).unwrap());
    assert_eq!(purchase.ticket.as_str(), "YO-GA-0001");
}
