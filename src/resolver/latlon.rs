//! Resolver for place descriptions that are already coordinate pairs.

use tracing::trace;

use super::Resolver;
use crate::location::GeocodedLocation;
use crate::status::{PrecisionCode, StatusCode};

const NAME: &str = "LatLonResolver";
const VERSION: &str = "0.43";

/// Recognizes place text of the form `"lat, lon"` or `"lat lon height"`
/// and turns it straight into coordinates, no lookup service involved.
///
/// Fields may be separated by commas, whitespace, or both. Two fields
/// are latitude and longitude with height zero; a third field is the
/// height. Anything else, including coordinates at or beyond a full
/// turn (360 degrees), is reported as an unknown address so the next
/// resolver in a chain gets its chance.
#[derive(Debug, Default, Clone, Copy)]
pub struct LatLonResolver;

impl LatLonResolver {
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, place_text: &str) -> Option<(f64, f64, f64)> {
        let fields: Vec<&str> = place_text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .collect();
        if fields.len() != 2 && fields.len() != 3 {
            return None;
        }

        let latitude = fields[0].parse::<f64>().ok()?;
        let longitude = fields[1].parse::<f64>().ok()?;
        let height = match fields.get(2) {
            Some(field) => field.parse::<f64>().ok()?,
            None => 0.0,
        };

        let in_range = |v: f64| v > -360.0 && v < 360.0;
        if !in_range(latitude) || !in_range(longitude) {
            return None;
        }
        Some((latitude, longitude, height))
    }
}

impl Resolver for LatLonResolver {
    fn resolve(&self, place_text: &str) -> GeocodedLocation {
        match self.parse(place_text) {
            Some((latitude, longitude, height)) => {
                trace!(place_text, latitude, longitude, "parsed coordinate pair");
                GeocodedLocation::new(
                    place_text,
                    StatusCode::SuccessNoServer,
                    PrecisionCode::LatLon,
                    "",
                    latitude,
                    longitude,
                    height,
                )
            }
            None => GeocodedLocation::new(
                place_text.trim(),
                StatusCode::UnknownAddress,
                PrecisionCode::Unknown,
                "",
                0.0,
                0.0,
                0.0,
            ),
        }
    }

    fn name(&self) -> &str {
        NAME
    }

    fn version(&self) -> &str {
        VERSION
    }
}
