//! Settled purchase records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::reservation::Reservation;
use crate::ticket::TicketNumber;

/// One settled ticket sale.
///
/// Written exactly once per settled reservation, never mutated or deleted.
/// The per-(concert, category) count of these records drives ticket
/// numbering, so the history is also the numbering source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    /// Holder name carried over from the reservation.
    pub holder: String,
    /// The settled ticket number.
    pub ticket: TicketNumber,
    /// Concert name.
    pub concert: String,
    /// Category name.
    pub category: String,
    /// Number of tickets sold.
    pub quantity: u32,
    /// Total paid price (excluding change).
    pub total_price: Decimal,
    /// When settlement completed.
    pub settled_at: DateTime<Utc>,
}

impl Purchase {
    /// Build the purchase record for `reservation` at settlement time.
    #[must_use]
    pub fn from_reservation(reservation: &Reservation, settled_at: DateTime<Utc>) -> Self {
        Self {
            holder: reservation.holder.clone(),
            ticket: reservation.ticket.clone(),
            concert: reservation.concert.clone(),
            category: reservation.category.clone(),
            quantity: reservation.quantity,
            total_price: reservation.total_price,
            settled_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_reservation_fields() {
        let reserved_at = Utc::now();
        let reservation = Reservation::dummy_at(
            "Budi",
            TicketNumber::compose("Jazz Night", "Regular", 1),
            reserved_at,
        );
        let settled_at = reserved_at + chrono::Duration::seconds(42);

        let purchase = Purchase::from_reservation(&reservation, settled_at);
        assert_eq!(purchase.holder, "Budi");
        assert_eq!(purchase.ticket, reservation.ticket);
        assert_eq!(purchase.concert, "Jazz Night");
        assert_eq!(purchase.quantity, 1);
        assert_eq!(purchase.total_price, reservation.total_price);
        assert_eq!(purchase.settled_at, settled_at);
    }

    #[test]
    fn serde_round_trip() {
        let reservation =
            Reservation::dummy("Siti", TicketNumber::compose("Rock Festival", "VIP", 7));
        let purchase = Purchase::from_reservation(&reservation, Utc::now());

        let json = serde_json::to_string(&purchase).unwrap();
        let back: Purchase = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ticket, purchase.ticket);
        assert_eq!(back.total_price, purchase.total_price);
        assert_eq!(back.settled_at, purchase.settled_at);
    }
}
