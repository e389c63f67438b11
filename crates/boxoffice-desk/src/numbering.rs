//! Ticket number assignment.
//!
//! The sequence for a (concert, category) pair is its durable purchase
//! count plus one. In-memory queue state is never consulted, so numbers
//! stay stable across process restarts; the flip side is that concurrent
//! pending reservations for the same pair would compose the same number,
//! which the queue and the settlement engine both reject.

use boxoffice_store::TicketStore;
use boxoffice_types::{Result, TicketNumber};

/// Next ticket number for the pair: purchase count plus one, composed as
/// `{concert prefix}-{category prefix}-{sequence}`.
///
/// # Errors
/// Propagates store failures from the count query.
pub fn next_ticket_number<S: TicketStore + ?Sized>(
    store: &S,
    concert: &str,
    category: &str,
) -> Result<TicketNumber> {
    let count = store.purchase_count(concert, category)?;
    Ok(TicketNumber::compose(concert, category, count + 1))
}
