//! Location model: normalized coordinates, numeric strategies, and the
//! resolution result record.
//!
//! [`Location`] holds a point (or circular area) on the globe in a
//! chosen numeric representation. The default `f64` representation is
//! used everywhere performance matters; [`rust_decimal::Decimal`] is
//! available for callers that need exact linear arithmetic, via the same
//! generic type. [`GeocodedLocation`] pairs a location with the status,
//! precision, and provenance of a resolution attempt.

mod format;
mod geocoded;
mod scalar;
mod types;

pub use format::{decimal_places, round_to_string, set_decimal_places, DEFAULT_DECIMAL_PLACES};
pub use geocoded::GeocodedLocation;
pub use scalar::{FormatError, Scalar};
pub use types::{Location, LocationKind};
