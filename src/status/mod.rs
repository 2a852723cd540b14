//! Outcome and precision vocabularies shared by resolvers, the chain, and
//! the cache.
//!
//! Status codes classify how a resolution attempt went; precision codes
//! classify how geographically specific a resolved location is. Resolvers
//! must set a status recognized here as successful for their responses to be
//! used by the chain — everything else is treated as failure, including codes
//! that sound benign.
//!
//! The numeric discriminants follow the classic Google geocoder response
//! codes (200, 500, 601..610) with local extensions in the 9997..9999 range.

use std::fmt;

/// Outcome classification for a resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StatusCode {
    /// A status code has not been set yet (freshly constructed query object).
    NotSet = -1,
    /// A server was queried and returned a usable location.
    Success = 200,
    /// The backing service failed for an unknown reason.
    ServerError = 500,
    /// The place description was missing or empty.
    MissingAddress = 601,
    /// No geographic location could be found for the description.
    UnknownAddress = 602,
    /// The location exists but cannot be returned for legal or contractual
    /// reasons.
    UnavailableAddress = 603,
    /// The service credentials were invalid or did not match their domain.
    BadKey = 610,
    /// Outbound communication failed (I/O error, malformed URL).
    CommError = 9997,
    /// A resolver-internal failure (parse error, malformed response).
    ResolverError = 9998,
    /// No server was consulted but the result is trustworthy anyway
    /// (e.g. a lat/lon pair was supplied directly).
    SuccessNoServer = 9999,
}

impl StatusCode {
    /// Returns true if this code indicates a usable location value.
    ///
    /// Only [`StatusCode::Success`] and [`StatusCode::SuccessNoServer`]
    /// qualify; every other code is a failure for fallback and negative
    /// caching purposes.
    pub fn is_success(self) -> bool {
        matches!(self, StatusCode::Success | StatusCode::SuccessNoServer)
    }

    /// Returns the human-readable description of this code.
    pub fn describe(self) -> &'static str {
        match self {
            StatusCode::NotSet => "A status code has not been set.",
            StatusCode::Success => {
                "No errors occurred; the address was successfully parsed and its geocode has been returned."
            }
            StatusCode::ServerError => {
                "A resolution request could not be successfully processed, yet the exact reason for the failure is not known."
            }
            StatusCode::MissingAddress => "The place description was either missing or had no value.",
            StatusCode::UnknownAddress => {
                "No corresponding geographic location could be found for the specified address."
            }
            StatusCode::UnavailableAddress => {
                "The geocode for the given address cannot be returned due to legal or contractual reasons."
            }
            StatusCode::BadKey => {
                "The given key is either invalid or does not match the domain for which it was given."
            }
            StatusCode::CommError => "Communication error.",
            StatusCode::ResolverError => "Resolver error.",
            StatusCode::SuccessNoServer => {
                "A Lat,Lon pair was provided, so the server was not consulted."
            }
        }
    }

    /// Returns the numeric wire value of this code.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps a numeric wire value back to a code, if it is known.
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            -1 => Some(StatusCode::NotSet),
            200 => Some(StatusCode::Success),
            500 => Some(StatusCode::ServerError),
            601 => Some(StatusCode::MissingAddress),
            602 => Some(StatusCode::UnknownAddress),
            603 => Some(StatusCode::UnavailableAddress),
            610 => Some(StatusCode::BadKey),
            9997 => Some(StatusCode::CommError),
            9998 => Some(StatusCode::ResolverError),
            9999 => Some(StatusCode::SuccessNoServer),
            _ => None,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Describes a raw numeric status value, falling back to its literal form
/// when no description is registered.
pub fn describe_status(code: i32) -> String {
    match StatusCode::from_i32(code) {
        Some(status) => status.describe().to_string(),
        None => code.to_string(),
    }
}

/// Geographic specificity of a resolved location.
///
/// Based on the classic "address accuracy" scale (0..8) and extended for
/// local needs (area, continent, supplied lat/lon).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PrecisionCode {
    /// Unknown location.
    Unknown = 0,
    /// Country level.
    Country = 1,
    /// Region (state, province, prefecture) level.
    Region = 2,
    /// Sub-region (county, municipality) level.
    SubRegion = 3,
    /// Town (city, village) level.
    Town = 4,
    /// Post code (zip code) level.
    Postcode = 5,
    /// Street level.
    Street = 6,
    /// Intersection level.
    Intersection = 7,
    /// Address level.
    Address = 8,
    /// Non-politically-defined region or place.
    Area = 96,
    /// Continent.
    Continent = 97,
    /// Located, but with unknown accuracy.
    UnknownAccuracy = 98,
    /// Input data were provided as a latitude/longitude pair.
    LatLon = 99,
}

impl PrecisionCode {
    /// Returns the human-readable description of this code.
    pub fn describe(self) -> &'static str {
        match self {
            PrecisionCode::Unknown => "Unknown location.",
            PrecisionCode::Country => "Country level accuracy.",
            PrecisionCode::Region => "Region (state, province, prefecture, etc.) level accuracy.",
            PrecisionCode::SubRegion => "Sub-region (county, municipality, etc.) level accuracy.",
            PrecisionCode::Town => "Town (city, village) level accuracy.",
            PrecisionCode::Postcode => "Post code (zip code) level accuracy.",
            PrecisionCode::Street => "Street level accuracy.",
            PrecisionCode::Intersection => "Intersection level accuracy.",
            PrecisionCode::Address => "Address level accuracy.",
            PrecisionCode::Area => "Non-politically-defined region or place, unknown accuracy.",
            PrecisionCode::Continent => "Continent.",
            PrecisionCode::UnknownAccuracy => "Unknown accuracy.",
            PrecisionCode::LatLon => {
                "Input data were provided as Latitude,Longitude; source data accuracy."
            }
        }
    }

    /// Returns the numeric wire value of this code.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps a numeric wire value back to a code, if it is known.
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(PrecisionCode::Unknown),
            1 => Some(PrecisionCode::Country),
            2 => Some(PrecisionCode::Region),
            3 => Some(PrecisionCode::SubRegion),
            4 => Some(PrecisionCode::Town),
            5 => Some(PrecisionCode::Postcode),
            6 => Some(PrecisionCode::Street),
            7 => Some(PrecisionCode::Intersection),
            8 => Some(PrecisionCode::Address),
            96 => Some(PrecisionCode::Area),
            97 => Some(PrecisionCode::Continent),
            98 => Some(PrecisionCode::UnknownAccuracy),
            99 => Some(PrecisionCode::LatLon),
            _ => None,
        }
    }
}

impl fmt::Display for PrecisionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Describes a raw numeric precision value, falling back to its literal form
/// when no description is registered.
pub fn describe_precision(code: i32) -> String {
    match PrecisionCode::from_i32(code) {
        Some(precision) => precision.describe().to_string(),
        None => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_two_codes_are_success() {
        let all = [
            StatusCode::NotSet,
            StatusCode::Success,
            StatusCode::ServerError,
            StatusCode::MissingAddress,
            StatusCode::UnknownAddress,
            StatusCode::UnavailableAddress,
            StatusCode::BadKey,
            StatusCode::CommError,
            StatusCode::ResolverError,
            StatusCode::SuccessNoServer,
        ];

        for code in all {
            let expected =
                matches!(code, StatusCode::Success | StatusCode::SuccessNoServer);
            assert_eq!(
                code.is_success(),
                expected,
                "{:?} success classification is wrong",
                code
            );
        }
    }

    #[test]
    fn test_benign_sounding_codes_are_failures() {
        // NotSet and UnavailableAddress are not errors per se, but neither
        // carries a usable location.
        assert!(!StatusCode::NotSet.is_success());
        assert!(!StatusCode::UnavailableAddress.is_success());
    }

    #[test]
    fn test_status_wire_values_roundtrip() {
        for code in [
            StatusCode::NotSet,
            StatusCode::Success,
            StatusCode::ServerError,
            StatusCode::MissingAddress,
            StatusCode::UnknownAddress,
            StatusCode::UnavailableAddress,
            StatusCode::BadKey,
            StatusCode::CommError,
            StatusCode::ResolverError,
            StatusCode::SuccessNoServer,
        ] {
            assert_eq!(StatusCode::from_i32(code.as_i32()), Some(code));
        }
    }

    #[test]
    fn test_status_wire_values_match_originals() {
        assert_eq!(StatusCode::Success.as_i32(), 200);
        assert_eq!(StatusCode::UnknownAddress.as_i32(), 602);
        assert_eq!(StatusCode::SuccessNoServer.as_i32(), 9999);
        assert_eq!(StatusCode::NotSet.as_i32(), -1);
    }

    #[test]
    fn test_describe_unknown_status_falls_back_to_literal() {
        assert_eq!(describe_status(12345), "12345");
        assert_eq!(describe_status(200), StatusCode::Success.describe());
    }

    #[test]
    fn test_precision_wire_values_roundtrip() {
        for code in [
            PrecisionCode::Unknown,
            PrecisionCode::Country,
            PrecisionCode::Region,
            PrecisionCode::SubRegion,
            PrecisionCode::Town,
            PrecisionCode::Postcode,
            PrecisionCode::Street,
            PrecisionCode::Intersection,
            PrecisionCode::Address,
            PrecisionCode::Area,
            PrecisionCode::Continent,
            PrecisionCode::UnknownAccuracy,
            PrecisionCode::LatLon,
        ] {
            assert_eq!(PrecisionCode::from_i32(code.as_i32()), Some(code));
        }
    }

    #[test]
    fn test_describe_unknown_precision_falls_back_to_literal() {
        assert_eq!(describe_precision(-7), "-7");
        assert_eq!(
            describe_precision(99),
            PrecisionCode::LatLon.describe()
        );
    }

    #[test]
    fn test_display_uses_description() {
        assert_eq!(
            StatusCode::CommError.to_string(),
            "Communication error."
        );
        assert_eq!(PrecisionCode::Continent.to_string(), "Continent.");
    }
}
