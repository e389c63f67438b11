//! Reservation intake.
//!
//! Intake validates the request, freezes the total price from the catalog,
//! assigns a ticket number from durable history, and enqueues the
//! reservation with a payment deadline. Inventory is untouched: a
//! reservation occupies a payment slot, not capacity, so intake can admit
//! more demand than the store can settle.

use boxoffice_queue::ReservationQueue;
use boxoffice_store::TicketStore;
use boxoffice_types::{
    BoxofficeError, DeskConfig, Reservation, ReservationId, ReservationRequest, Result,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::numbering::next_ticket_number;

/// Takes ticket requests into the payment queue.
pub struct BookingDesk {
    /// How long an accepted reservation holds its payment slot.
    hold_window: std::time::Duration,
}

impl BookingDesk {
    /// Desk configured with the session's hold window.
    #[must_use]
    pub fn new(config: &DeskConfig) -> Self {
        Self {
            hold_window: config.hold_window,
        }
    }

    /// Validate `request`, freeze its price, assign a ticket number, and
    /// enqueue a reservation whose deadline is `now` plus the hold window.
    ///
    /// Returns the enqueued reservation so the caller can show the ticket
    /// number and deadline.
    ///
    /// # Errors
    /// - [`BoxofficeError::InvalidQuantity`] for a zero quantity
    /// - [`BoxofficeError::UnknownConcert`] / [`BoxofficeError::UnknownCategory`]
    ///   for an unlisted pair
    /// - [`BoxofficeError::TicketPending`] when the composed ticket number
    ///   is already waiting in the queue
    /// - [`BoxofficeError::Persistence`] on store failures
    pub fn reserve<S: TicketStore + ?Sized>(
        &self,
        queue: &mut ReservationQueue,
        store: &S,
        request: &ReservationRequest,
        now: DateTime<Utc>,
    ) -> Result<Reservation> {
        if request.quantity == 0 {
            return Err(BoxofficeError::InvalidQuantity(request.quantity));
        }

        let unit_price = store.unit_price(&request.concert, &request.category)?;
        let total_price = unit_price * Decimal::from(request.quantity);
        let ticket = next_ticket_number(store, &request.concert, &request.category)?;

        let reservation = Reservation {
            id: ReservationId::new(),
            holder: request.holder.clone(),
            ticket,
            concert: request.concert.clone(),
            category: request.category.clone(),
            quantity: request.quantity,
            total_price,
            reserved_at: now,
            deadline: now + self.hold_window,
        };

        queue.enqueue(reservation.clone())?;
        info!(
            id = %reservation.id,
            ticket = %reservation.ticket,
            holder = %reservation.holder,
            concert = %reservation.concert,
            category = %reservation.category,
            quantity = reservation.quantity,
            total = %reservation.total_price,
            deadline = %reservation.deadline,
            "reservation queued"
        );
        Ok(reservation)
    }
}
