//! Configuration for the box office desk and catalog seeds.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HOLD_WINDOW_SECS, SETTLED_CACHE_SIZE};

/// Tunables for one serving session of the box office.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskConfig {
    /// How long a reservation holds its payment slot before expiring.
    pub hold_window: Duration,
    /// Settled ticket numbers the settlement guard remembers before
    /// evicting the oldest.
    pub settled_cache: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            hold_window: Duration::from_secs(DEFAULT_HOLD_WINDOW_SECS),
            settled_cache: SETTLED_CACHE_SIZE,
        }
    }
}

/// Catalog seed for one concert: its name and priced categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcertConfig {
    /// Concert name, the catalog lookup key.
    pub name: String,
    /// Categories on sale for this concert.
    pub categories: Vec<CategoryConfig>,
}

/// Price and opening capacity for one category of a concert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Category name, unique within its concert.
    pub name: String,
    /// Unit price for one ticket.
    pub price: Decimal,
    /// Capacity at the start of sales.
    pub capacity: u32,
}

impl ConcertConfig {
    /// Demo seed: "Jazz Night" with VIP and Regular tiers.
    #[must_use]
    pub fn jazz_night() -> Self {
        Self {
            name: "Jazz Night".to_string(),
            categories: vec![
                CategoryConfig {
                    name: "VIP".to_string(),
                    price: Decimal::new(250_000, 0),
                    capacity: 50,
                },
                CategoryConfig {
                    name: "Regular".to_string(),
                    price: Decimal::new(100_000, 0),
                    capacity: 200,
                },
            ],
        }
    }

    /// Demo seed: "Rock Festival" with VIP and Regular tiers.
    #[must_use]
    pub fn rock_festival() -> Self {
        Self {
            name: "Rock Festival".to_string(),
            categories: vec![
                CategoryConfig {
                    name: "VIP".to_string(),
                    price: Decimal::new(350_000, 0),
                    capacity: 80,
                },
                CategoryConfig {
                    name: "Regular".to_string(),
                    price: Decimal::new(150_000, 0),
                    capacity: 500,
                },
            ],
        }
    }
}
