//! In-memory [`TicketStore`] for tests and single-process deployments.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use boxoffice_types::{BoxofficeError, ConcertConfig, Purchase, Result, TicketNumber};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::store::{CatalogMap, TicketStore};

/// Price and remaining capacity for one listed (concert, category) pair.
#[derive(Debug, Clone, Copy)]
struct Listing {
    price: Decimal,
    remaining: u32,
}

#[derive(Debug, Default)]
struct Inner {
    /// Concert name to category name to listing. Prices are immutable
    /// after seeding; only `remaining` changes.
    catalog: BTreeMap<String, BTreeMap<String, Listing>>,
    /// Append-only settlement history, oldest first.
    purchases: Vec<Purchase>,
}

/// Map-backed store behind a single lock.
///
/// The store-wide lock serializes capacity decrements, satisfying the
/// per-(concert, category) serialization requirement at a coarser grain.
/// Shareable across serving sessions through `Arc`.
pub struct MemoryTicketStore {
    inner: Mutex<Inner>,
}

impl MemoryTicketStore {
    /// Empty store with no listed concerts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Store seeded from concert configs.
    #[must_use]
    pub fn from_configs(configs: &[ConcertConfig]) -> Self {
        let mut catalog: BTreeMap<String, BTreeMap<String, Listing>> = BTreeMap::new();
        for concert in configs {
            let tiers = catalog.entry(concert.name.clone()).or_default();
            for category in &concert.categories {
                tiers.insert(
                    category.name.clone(),
                    Listing {
                        price: category.price,
                        remaining: category.capacity,
                    },
                );
            }
        }
        Self {
            inner: Mutex::new(Inner {
                catalog,
                purchases: Vec::new(),
            }),
        }
    }

    /// Full purchase history, oldest first. Audit view of this
    /// implementation; not part of the [`TicketStore`] contract.
    pub fn purchases(&self) -> Result<Vec<Purchase>> {
        Ok(self.lock()?.purchases.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| BoxofficeError::Persistence("ticket store lock poisoned".to_string()))
    }
}

/// Demo seed for examples and tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl MemoryTicketStore {
    /// Store seeded with [`ConcertConfig::jazz_night`] and
    /// [`ConcertConfig::rock_festival`].
    #[must_use]
    pub fn demo() -> Self {
        Self::from_configs(&[ConcertConfig::jazz_night(), ConcertConfig::rock_festival()])
    }
}

impl Default for MemoryTicketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketStore for MemoryTicketStore {
    fn prices(&self) -> Result<CatalogMap<Decimal>> {
        let inner = self.lock()?;
        Ok(inner
            .catalog
            .iter()
            .map(|(concert, tiers)| {
                let prices = tiers
                    .iter()
                    .map(|(category, listing)| (category.clone(), listing.price))
                    .collect();
                (concert.clone(), prices)
            })
            .collect())
    }

    fn capacities(&self) -> Result<CatalogMap<u32>> {
        let inner = self.lock()?;
        Ok(inner
            .catalog
            .iter()
            .map(|(concert, tiers)| {
                let remaining = tiers
                    .iter()
                    .map(|(category, listing)| (category.clone(), listing.remaining))
                    .collect();
                (concert.clone(), remaining)
            })
            .collect())
    }

    fn unit_price(&self, concert: &str, category: &str) -> Result<Decimal> {
        let inner = self.lock()?;
        lookup(&inner, concert, category).map(|listing| listing.price)
    }

    fn remaining_capacity(&self, concert: &str, category: &str) -> Result<u32> {
        let inner = self.lock()?;
        lookup(&inner, concert, category).map(|listing| listing.remaining)
    }

    fn decrement_capacity(&self, concert: &str, category: &str, quantity: u32) -> Result<()> {
        let mut inner = self.lock()?;
        let listing = inner
            .catalog
            .get_mut(concert)
            .ok_or_else(|| BoxofficeError::UnknownConcert(concert.to_string()))?
            .get_mut(category)
            .ok_or_else(|| BoxofficeError::UnknownCategory {
                concert: concert.to_string(),
                category: category.to_string(),
            })?;

        if listing.remaining < quantity {
            return Err(BoxofficeError::InsufficientCapacity {
                concert: concert.to_string(),
                category: category.to_string(),
                requested: quantity,
                remaining: listing.remaining,
            });
        }
        listing.remaining -= quantity;
        debug!(
            concert,
            category,
            quantity,
            remaining = listing.remaining,
            "capacity decremented"
        );
        Ok(())
    }

    fn purchase_count(&self, concert: &str, category: &str) -> Result<u64> {
        let inner = self.lock()?;
        Ok(pair_count(&inner.purchases, concert, category))
    }

    fn record_purchase(&self, purchase: &Purchase) -> Result<()> {
        let mut inner = self.lock()?;

        // Sequence check and append under one lock acquisition: a number
        // whose sequence has already been consumed cannot enter history,
        // no matter how the callers interleave.
        let sequence = pair_count(&inner.purchases, &purchase.concert, &purchase.category) + 1;
        let expected = TicketNumber::compose(&purchase.concert, &purchase.category, sequence);
        if purchase.ticket != expected {
            warn!(
                ticket = %purchase.ticket,
                expected = %expected,
                "purchase rejected, ticket number is not the pair's next sequence"
            );
            return Err(BoxofficeError::TicketAlreadySettled(purchase.ticket.clone()));
        }

        inner.purchases.push(purchase.clone());
        debug!(ticket = %purchase.ticket, "purchase recorded");
        Ok(())
    }
}

/// Number of purchase records for the exact (concert, category) pair.
fn pair_count(purchases: &[Purchase], concert: &str, category: &str) -> u64 {
    purchases
        .iter()
        .filter(|purchase| purchase.concert == concert && purchase.category == category)
        .count() as u64
}

/// Point lookup distinguishing a missing concert from a missing category.
fn lookup<'a>(inner: &'a Inner, concert: &str, category: &str) -> Result<&'a Listing> {
    let tiers = inner
        .catalog
        .get(concert)
        .ok_or_else(|| BoxofficeError::UnknownConcert(concert.to_string()))?;
    tiers
        .get(category)
        .ok_or_else(|| BoxofficeError::UnknownCategory {
            concert: concert.to_string(),
            category: category.to_string(),
        })
}
