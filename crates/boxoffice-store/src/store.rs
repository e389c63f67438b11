//! The [`TicketStore`] contract.
//!
//! The engine treats persistence as an external keyed store with three
//! facets: a read-only price catalog, a capacity catalog with exactly one
//! mutation (the settlement decrement), and an append-only purchase
//! history with a per-(concert, category) count query that drives ticket
//! numbering.

use std::collections::BTreeMap;

use boxoffice_types::{CatalogEntry, Purchase, Result};
use rust_decimal::Decimal;

/// Concert name to category name to value, as served to browse views.
/// `BTreeMap` keeps listing order deterministic.
pub type CatalogMap<T> = BTreeMap<String, BTreeMap<String, T>>;

/// Boundary contract with the backing store.
///
/// Implementations must serialize capacity decrements on the same
/// (concert, category) pair: two settlements racing on one category must
/// never both succeed past the remaining capacity.
pub trait TicketStore: Send + Sync {
    /// Full price catalog: concert, category, unit price.
    fn prices(&self) -> Result<CatalogMap<Decimal>>;

    /// Full capacity catalog: concert, category, remaining units.
    fn capacities(&self) -> Result<CatalogMap<u32>>;

    /// Unit price for one (concert, category) pair.
    ///
    /// # Errors
    /// `UnknownConcert` or `UnknownCategory` when the pair is not listed.
    fn unit_price(&self, concert: &str, category: &str) -> Result<Decimal>;

    /// Remaining capacity for one (concert, category) pair.
    fn remaining_capacity(&self, concert: &str, category: &str) -> Result<u32>;

    /// Atomically decrement remaining capacity by `quantity`.
    ///
    /// The read-check-write is one logical unit. A shortfall is rejected
    /// with `InsufficientCapacity`, never clamped, so remaining capacity
    /// cannot go negative. There is no increment: capacity moves in one
    /// direction only, and only at settlement.
    fn decrement_capacity(&self, concert: &str, category: &str, quantity: u32) -> Result<()>;

    /// Number of purchase records for the exact (concert, category) pair.
    fn purchase_count(&self, concert: &str, category: &str) -> Result<u64>;

    /// Append one purchase record. The history is append-only.
    ///
    /// Implementations must verify, in the same critical section as the
    /// append, that the record's ticket number is still the pair's next
    /// sequence (`purchase_count + 1`), rejecting anything else with
    /// `TicketAlreadySettled`. Two settlements racing the same sequence
    /// must never both append.
    fn record_purchase(&self, purchase: &Purchase) -> Result<()>;

    /// Browse rows merging unit price with remaining capacity, in
    /// deterministic catalog order.
    fn listings(&self) -> Result<Vec<CatalogEntry>> {
        let prices = self.prices()?;
        let capacities = self.capacities()?;

        let mut rows = Vec::new();
        for (concert, tiers) in &prices {
            for (category, price) in tiers {
                let remaining = capacities
                    .get(concert)
                    .and_then(|categories| categories.get(category))
                    .copied()
                    .unwrap_or(0);
                rows.push(CatalogEntry {
                    concert: concert.clone(),
                    category: category.clone(),
                    price: *price,
                    remaining,
                });
            }
        }
        Ok(rows)
    }
}
