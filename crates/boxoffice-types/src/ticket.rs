//! Ticket number composition.
//!
//! A ticket number is `{concert prefix}-{category prefix}-{sequence}`,
//! where each prefix is the first three characters of the name, uppercased
//! (shorter names are used in full), and the sequence is four digits,
//! zero-padded. The third purchase of ("Jazz Night", "VIP") is therefore
//! followed by ticket `JAZ-VIP-0004`.
//!
//! Sequences come from the durable purchase history, never from in-memory
//! queue state, so numbering survives process restarts. Two concerts that
//! share a prefix share a number space per category; the running count is
//! the only collision avoidance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{TICKET_PREFIX_LEN, TICKET_SEQ_WIDTH};

/// A composed ticket number such as `JAZ-VIP-0004`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketNumber(String);

impl TicketNumber {
    /// Compose a ticket number from the concert name, the category name,
    /// and a 1-based sequence.
    ///
    /// Sequences above 9999 widen past four digits rather than wrap.
    #[must_use]
    pub fn compose(concert: &str, category: &str, sequence: u64) -> Self {
        let width = TICKET_SEQ_WIDTH;
        Self(format!(
            "{}-{}-{sequence:0width$}",
            prefix(concert),
            prefix(category),
        ))
    }

    /// The composed number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First [`TICKET_PREFIX_LEN`] characters of `name`, uppercased.
fn prefix(name: &str) -> String {
    name.chars()
        .take(TICKET_PREFIX_LEN)
        .collect::<String>()
        .to_uppercase()
}
