//! Error types for the BoxOffice engine.
//!
//! All errors carry a stable `BO_ERR_` code so log lines can be grepped by
//! failure class:
//!
//! - `1xx`: reservation intake
//! - `2xx`: inventory / capacity
//! - `3xx`: payment / settlement
//! - `9xx`: persistence and internal failures
//!
//! An empty payment queue is deliberately *not* an error: it is reported
//! through `PaymentOutcome::QueueEmpty` and `QueueSnapshot::Empty` so that
//! "nothing to do" never shows up in logs as a failure.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::ticket::TicketNumber;

/// Central error type for all BoxOffice operations.
#[derive(Debug, Error)]
pub enum BoxofficeError {
    // ================================================================
    // Reservation Intake (1xx)
    // ================================================================
    /// The requested concert is not in the catalog.
    #[error("BO_ERR_100: unknown concert: {0}")]
    UnknownConcert(String),

    /// The concert exists but has no such category.
    #[error("BO_ERR_101: unknown category {category} for concert {concert}")]
    UnknownCategory { concert: String, category: String },

    /// Reservations must request at least one ticket.
    #[error("BO_ERR_102: invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(u32),

    /// A reservation with the same ticket number is already waiting in the
    /// payment queue.
    #[error("BO_ERR_103: ticket {0} is already pending payment")]
    TicketPending(TicketNumber),

    // ================================================================
    // Inventory / Capacity (2xx)
    // ================================================================
    /// Remaining capacity cannot cover the requested quantity. The
    /// decrement is rejected, never clamped, so capacity stays
    /// non-negative. The reservation stays queued for a retry.
    #[error(
        "BO_ERR_200: insufficient capacity for {concert}/{category}: \
         requested {requested}, remaining {remaining}"
    )]
    InsufficientCapacity {
        concert: String,
        category: String,
        requested: u32,
        remaining: u32,
    },

    // ================================================================
    // Payment / Settlement (3xx)
    // ================================================================
    /// The tendered amount does not cover the total price. No state
    /// changes; the reservation stays at the head of the queue.
    #[error("BO_ERR_300: insufficient payment: required {required}, tendered {tendered}")]
    InsufficientPayment { required: Decimal, tendered: Decimal },

    /// The ticket number has already completed settlement.
    #[error("BO_ERR_301: ticket {0} already settled")]
    TicketAlreadySettled(TicketNumber),

    // ================================================================
    // Persistence / Internal (9xx)
    // ================================================================
    /// The backing store failed. Settlement aborts before the dequeue
    /// step, so the head reservation survives for a retry.
    #[error("BO_ERR_900: persistence failure: {0}")]
    Persistence(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BoxofficeError>;

impl From<std::io::Error> for BoxofficeError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}
