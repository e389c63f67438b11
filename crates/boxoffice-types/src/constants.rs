//! System-wide constants for the BoxOffice engine.

/// Default hold window in seconds: how long a reservation may wait in the
/// payment queue before it expires.
pub const DEFAULT_HOLD_WINDOW_SECS: u64 = 300;

/// Characters taken from the concert and category names when composing a
/// ticket number. Names shorter than this are used in full.
pub const TICKET_PREFIX_LEN: usize = 3;

/// Zero-padded width of the sequence component of a ticket number.
/// Sequences past 9999 widen rather than wrap.
pub const TICKET_SEQ_WIDTH: usize = 4;

/// Default number of settled ticket numbers the settlement guard remembers
/// before evicting the oldest.
pub const SETTLED_CACHE_SIZE: usize = 10_000;

/// Service name for logging and diagnostics.
pub const SERVICE_NAME: &str = "boxoffice";

/// Crate version, from Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_window_is_five_minutes() {
        assert_eq!(DEFAULT_HOLD_WINDOW_SECS, 300);
    }

    #[test]
    fn ticket_format_dimensions() {
        assert_eq!(TICKET_PREFIX_LEN, 3);
        assert_eq!(TICKET_SEQ_WIDTH, 4);
    }
}
