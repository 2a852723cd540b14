//! Process-wide coordinate display precision.
//!
//! Equality and hashing of locations are defined over their displayed
//! form, so every rendering path must agree on the number of decimal
//! places. The precision is a process-wide setting fixed at first use.

use std::sync::OnceLock;

/// Decimal places used when no override has been installed.
pub const DEFAULT_DECIMAL_PLACES: usize = 4;

static DECIMAL_PLACES: OnceLock<usize> = OnceLock::new();

/// Sets the process-wide display precision.
///
/// Succeeds only before the first coordinate is rendered or compared;
/// once any caller has observed the precision it is fixed for the life
/// of the process, since stored hashes would otherwise go stale.
/// Returns the already-fixed value on failure.
pub fn set_decimal_places(places: usize) -> Result<(), usize> {
    DECIMAL_PLACES.set(places).map_err(|_| decimal_places())
}

/// The active display precision.
pub fn decimal_places() -> usize {
    *DECIMAL_PLACES.get_or_init(|| DEFAULT_DECIMAL_PLACES)
}

/// Renders a value with the active precision, zero-padded to a fixed
/// number of fraction digits.
pub fn round_to_string(value: f64) -> String {
    format!("{:.*}", decimal_places(), value)
}
