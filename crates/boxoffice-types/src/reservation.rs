//! Reservation records and their lifecycle.
//!
//! A reservation is an immutable snapshot taken at intake time: the total
//! price is frozen then (quantity times the unit price at that moment) and
//! the payment deadline is fixed at intake time plus the hold window. The
//! record is never mutated afterwards; it leaves the payment queue either
//! through settlement or through expiry.
//!
//! ## Lifecycle
//!
//! ```text
//!              payment accepted
//!   ┌─────────┐ and committed  ┌─────────┐
//!   │ PENDING ├───────────────►│ SETTLED │
//!   └────┬────┘                └─────────┘
//!        │ deadline passed
//!        ▼
//!   ┌─────────┐
//!   │ EXPIRED │
//!   └─────────┘
//! ```
//!
//! Both non-pending states are terminal. A reservation's state is
//! positional rather than stored: any entry in the queue is pending. The
//! enum exists so transitions can be validated and logged uniformly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::ReservationId;
use crate::ticket::TicketNumber;

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationState {
    /// Waiting in the payment queue.
    Pending,
    /// Payment accepted; capacity decremented and purchase recorded.
    Settled,
    /// Deadline passed without payment; removed with no side effects.
    Expired,
}

impl ReservationState {
    /// Whether this state may transition to `target`.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!((self, target), (Self::Pending, Self::Settled | Self::Expired))
    }
}

impl std::fmt::Display for ReservationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Settled => "SETTLED",
            Self::Expired => "EXPIRED",
        };
        write!(f, "{s}")
    }
}

/// A pending, unpaid ticket request occupying one slot in the payment
/// queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Log-correlation id. Queue uniqueness is keyed on `ticket`.
    pub id: ReservationId,
    /// Holder name exactly as entered at intake.
    pub holder: String,
    /// Ticket number assigned at intake, unique among pending entries.
    pub ticket: TicketNumber,
    /// Concert name, a lookup key into the inventory store.
    pub concert: String,
    /// Category name within the concert.
    pub category: String,
    /// Number of tickets requested, at least 1.
    pub quantity: u32,
    /// Unit price times quantity, frozen at intake.
    pub total_price: Decimal,
    /// When the reservation was taken.
    pub reserved_at: DateTime<Utc>,
    /// Payment deadline: `reserved_at` plus the hold window.
    pub deadline: DateTime<Utc>,
}

impl Reservation {
    /// Whether the deadline has passed at `at`. A reservation exactly at
    /// its deadline is not yet expired.
    #[must_use]
    pub fn is_expired(&self, at: DateTime<Utc>) -> bool {
        self.deadline < at
    }

    /// Time left until the deadline, saturating at zero once expired.
    #[must_use]
    pub fn time_remaining(&self, at: DateTime<Utc>) -> chrono::Duration {
        if at >= self.deadline {
            chrono::Duration::zero()
        } else {
            self.deadline - at
        }
    }
}

/// A ticket request as received from the caller, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// Name of the person holding the reservation.
    pub holder: String,
    /// Requested concert.
    pub concert: String,
    /// Requested category within the concert.
    pub category: String,
    /// Number of tickets.
    pub quantity: u32,
}

/// Dummy constructors for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl Reservation {
    /// A one-ticket "Jazz Night" / "Regular" reservation taken now, with a
    /// five-minute window.
    #[must_use]
    pub fn dummy(holder: &str, ticket: TicketNumber) -> Self {
        Self::dummy_at(holder, ticket, Utc::now())
    }

    /// A one-ticket "Jazz Night" / "Regular" reservation taken at
    /// `reserved_at`, with a five-minute window.
    #[must_use]
    pub fn dummy_at(holder: &str, ticket: TicketNumber, reserved_at: DateTime<Utc>) -> Self {
        Self {
            id: ReservationId::new(),
            holder: holder.to_string(),
            ticket,
            concert: "Jazz Night".to_string(),
            category: "Regular".to_string(),
            quantity: 1,
            total_price: Decimal::new(100_000, 0),
            reserved_at,
            deadline: reserved_at + chrono::Duration::seconds(300),
        }
    }
}
