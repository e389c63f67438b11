//! # boxoffice-desk
//!
//! **Serving plane** of the BoxOffice engine: reservation intake, ticket
//! numbering, payment settlement, and the per-session facade tying them to
//! a shared [`TicketStore`](boxoffice_store::TicketStore) and an
//! exclusively owned reservation queue.
//!
//! ## Flow
//!
//! ```text
//!  reserve ──► validate ──► freeze price ──► assign ticket number
//!                                                │
//!                                                ▼
//!                                   ReservationQueue (FIFO)
//!                                                │ head
//!                                                ▼
//!  pay ──► purge expired heads ──► check amount ──► commit:
//!              (expiry is                           1. decrement capacity
//!               enforced here,                      2. append purchase
//!               nowhere else)                       3. dequeue
//! ```
//!
//! A reservation leaves the queue only through settlement, after both
//! store writes committed, or through head expiry.

pub mod booking;
pub mod guard;
pub mod numbering;
pub mod session;
pub mod settle;

pub use booking::BookingDesk;
pub use guard::SettledGuard;
pub use numbering::next_ticket_number;
pub use session::BoxOffice;
pub use settle::{PaymentDue, PaymentOutcome, SettlementEngine, next_due};
