//! # boxoffice-queue
//!
//! **Reservation queue** of the BoxOffice engine: a strict-FIFO payment
//! queue with head-only deadline expiry, case-insensitive holder search,
//! and an explicit empty-queue display marker.
//!
//! The queue holds no references to the inventory store; it is pure
//! in-memory state owned by one serving session. Expiry here removes
//! entries only, with no capacity effect, because intake never reserves
//! inventory.

pub mod queue;

pub use queue::{QueueSnapshot, ReservationQueue};
