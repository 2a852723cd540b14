//! Resolution result record.

use std::fmt;

use super::scalar::FormatError;
use super::types::Location;
use crate::status::{PrecisionCode, StatusCode};

/// The outcome of resolving a free-text place description: the place
/// text, normalized coordinates, a status, a precision grade, a country
/// code, and the identity of the resolver that produced the answer.
///
/// Coordinates use the fast `f64` representation; results travel through
/// caches and channels by value, so they stay cheap to clone.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    coordinates: Location,
    place_name: String,
    status: StatusCode,
    precision: PrecisionCode,
    country_code: String,
    resolver_id: String,
}

impl GeocodedLocation {
    /// Creates a fully-populated result.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        place_name: &str,
        status: StatusCode,
        precision: PrecisionCode,
        country_code: &str,
        latitude: f64,
        longitude: f64,
        height: f64,
    ) -> Self {
        Self {
            coordinates: Location::new(latitude, longitude, height),
            place_name: place_name.to_string(),
            status,
            precision,
            country_code: country_code.to_string(),
            resolver_id: String::new(),
        }
    }

    /// Creates a result from textual coordinate literals.
    pub fn from_strs(
        place_name: &str,
        status: StatusCode,
        precision: PrecisionCode,
        country_code: &str,
        latitude: &str,
        longitude: &str,
        height: &str,
    ) -> Result<Self, FormatError> {
        Ok(Self {
            coordinates: Location::from_strs(latitude, longitude, height)?,
            place_name: place_name.to_string(),
            status,
            precision,
            country_code: country_code.to_string(),
            resolver_id: String::new(),
        })
    }

    /// A blank record carrying only the place text, ready to be handed
    /// to a resolver for in-place resolution.
    pub fn for_query(place_name: &str) -> Self {
        Self::new(
            place_name,
            StatusCode::NotSet,
            PrecisionCode::Unknown,
            "",
            0.0,
            0.0,
            0.0,
        )
    }

    /// Whether this record carries a usable answer.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Clears every resolution field back to the unresolved state while
    /// keeping the place text. Used before re-running a record through a
    /// resolver so stale fields cannot leak through a failure.
    pub fn reset_unresolved(&mut self) {
        self.status = StatusCode::UnknownAddress;
        self.precision = PrecisionCode::Unknown;
        self.country_code.clear();
        self.coordinates.set(0.0, 0.0, 0.0);
    }

    pub fn place_name(&self) -> &str {
        &self.place_name
    }

    pub fn set_place_name(&mut self, place_name: &str) {
        self.place_name = place_name.to_string();
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn precision(&self) -> PrecisionCode {
        self.precision
    }

    pub fn set_precision(&mut self, precision: PrecisionCode) {
        self.precision = precision;
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn set_country_code(&mut self, country_code: &str) {
        self.country_code = country_code.to_string();
    }

    /// Identity of the resolver that produced this answer, typically
    /// `"{name} {version}"`. Empty until a chain stamps it.
    pub fn resolver_id(&self) -> &str {
        &self.resolver_id
    }

    pub fn set_resolver_id(&mut self, resolver_id: &str) {
        self.resolver_id = resolver_id.to_string();
    }

    pub fn coordinates(&self) -> &Location {
        &self.coordinates
    }

    /// Replaces the coordinates, renormalizing.
    pub fn set_coordinates(&mut self, latitude: f64, longitude: f64, height: f64) {
        self.coordinates.set(latitude, longitude, height);
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.longitude()
    }

    pub fn height(&self) -> f64 {
        self.coordinates.height()
    }
}

impl fmt::Display for GeocodedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' [{}] {} precision {} country '{}' via '{}'",
            self.place_name,
            self.status,
            self.coordinates,
            self.precision,
            self.country_code,
            self.resolver_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_query_is_blank_and_unsuccessful() {
        let record = GeocodedLocation::for_query("Boston, MA");
        assert_eq!(record.place_name(), "Boston, MA");
        assert_eq!(record.status(), StatusCode::NotSet);
        assert_eq!(record.precision(), PrecisionCode::Unknown);
        assert!(!record.is_success());
        assert_eq!(record.latitude(), 0.0);
        assert_eq!(record.resolver_id(), "");
    }

    #[test]
    fn test_new_normalizes_coordinates() {
        let record = GeocodedLocation::new(
            "over the pole",
            StatusCode::Success,
            PrecisionCode::LatLon,
            "",
            403.0,
            289.0,
            0.0,
        );
        assert_eq!(record.latitude(), 43.0);
        assert_eq!(record.longitude(), -71.0);
    }

    #[test]
    fn test_reset_clears_resolution_fields_but_keeps_place_name() {
        let mut record = GeocodedLocation::new(
            "Boston, MA",
            StatusCode::Success,
            PrecisionCode::Town,
            "US",
            42.36,
            -71.06,
            0.0,
        );
        record.set_resolver_id("SomeResolver 1.0");
        record.reset_unresolved();

        assert_eq!(record.place_name(), "Boston, MA");
        assert_eq!(record.status(), StatusCode::UnknownAddress);
        assert_eq!(record.precision(), PrecisionCode::Unknown);
        assert_eq!(record.country_code(), "");
        assert_eq!(record.latitude(), 0.0);
        assert_eq!(record.longitude(), 0.0);
        // Resolver identity is managed by the chain, not the reset.
        assert_eq!(record.resolver_id(), "SomeResolver 1.0");
    }

    #[test]
    fn test_from_strs_propagates_parse_failure() {
        let result = GeocodedLocation::from_strs(
            "bad",
            StatusCode::Success,
            PrecisionCode::LatLon,
            "",
            "42.0",
            "not-a-number",
            "0",
        );
        assert!(result.is_err());
    }
}
