//! Catalog browse rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One (concert, category) row of the catalog as shown to browsers: unit
/// price and live remaining capacity, merged from the two store views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Concert name.
    pub concert: String,
    /// Category name within the concert.
    pub category: String,
    /// Unit price for one ticket.
    pub price: Decimal,
    /// Remaining capacity at read time.
    pub remaining: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_round_trip() {
        let entry = CatalogEntry {
            concert: "Jazz Night".to_string(),
            category: "VIP".to_string(),
            price: Decimal::new(250_000, 0),
            remaining: 50,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: CatalogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.concert, entry.concert);
        assert_eq!(back.price, entry.price);
        assert_eq!(back.remaining, 50);
    }
}
