//! # boxoffice-store
//!
//! **Persistence boundary** of the BoxOffice engine: the [`TicketStore`]
//! contract over the price catalog, the capacity catalog, and the
//! append-only purchase history, plus the in-memory implementation used by
//! tests and single-process deployments.
//!
//! Capacity has exactly one mutation point,
//! [`TicketStore::decrement_capacity`], and it is atomic and
//! reject-not-clamp: remaining capacity never goes negative, and there is
//! no increment path (no refunds, no releases at expiry, nothing reserved
//! at intake).

pub mod memory;
pub mod store;

pub use memory::MemoryTicketStore;
pub use store::{CatalogMap, TicketStore};
