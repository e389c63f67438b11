//! # boxoffice-types
//!
//! Shared types for the **BoxOffice** ticket reservation engine.
//!
//! This crate is the leaf of the workspace; every other crate depends on
//! it. It defines:
//!
//! - **Identifiers**: [`ReservationId`], [`TicketNumber`]
//! - **Reservation model**: [`Reservation`], [`ReservationRequest`],
//!   [`ReservationState`]
//! - **Purchase model**: [`Purchase`]
//! - **Catalog model**: [`CatalogEntry`]
//! - **Configuration**: [`DeskConfig`], [`ConcertConfig`], [`CategoryConfig`]
//! - **Errors**: [`BoxofficeError`] with grep-able `BO_ERR_` codes, and the
//!   crate-wide [`Result`] alias
//! - **Constants**: system-wide defaults under [`constants`]
//!
//! With the `test-helpers` feature (or under `cfg(test)`), dummy
//! constructors become available for building fixture records.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod purchase;
pub mod reservation;
pub mod ticket;

// Re-export all primary types at crate root for ergonomic imports:
//   use boxoffice_types::{Reservation, TicketNumber, Result, ...};

pub use catalog::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use purchase::*;
pub use reservation::*;
pub use ticket::*;

// Constants are accessed via `boxoffice_types::constants::FOO`
// (not re-exported to avoid name collisions).
