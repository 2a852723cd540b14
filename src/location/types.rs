//! Geographic location value type.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::format::round_to_string;
use super::scalar::{FormatError, Scalar};
use crate::distance;

/// What a location denotes: a single point, or a circular area around
/// the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationKind {
    #[default]
    Point,
    Radius,
}

/// A point on the globe with an optional height and area radius.
///
/// Coordinates are always held normalized: latitude in `[-90, 90]`,
/// longitude in `(-180, 180]`, with out-of-range inputs folded over the
/// poles and around the antimeridian on construction and on every
/// mutation. Height is carried verbatim.
///
/// Equality and hashing are display-based: two locations are equal when
/// their latitude, longitude, and height render identically at the
/// process-wide precision. Kind and radius do not participate.
#[derive(Debug, Clone, Copy)]
pub struct Location<N: Scalar = f64> {
    latitude: N,
    longitude: N,
    height: N,
    kind: LocationKind,
    radius_meters: u32,
}

impl<N: Scalar> Location<N> {
    /// Creates a point location, normalizing the coordinates.
    pub fn new(latitude: N, longitude: N, height: N) -> Self {
        let mut loc = Self {
            latitude,
            longitude,
            height,
            kind: LocationKind::Point,
            radius_meters: 0,
        };
        loc.normalize();
        loc
    }

    /// Creates a location with an explicit kind and area radius.
    pub fn with_kind(
        latitude: N,
        longitude: N,
        height: N,
        kind: LocationKind,
        radius_meters: u32,
    ) -> Self {
        let mut loc = Self::new(latitude, longitude, height);
        loc.kind = kind;
        loc.radius_meters = radius_meters;
        loc
    }

    /// Creates a location from textual coordinate literals.
    pub fn from_strs(latitude: &str, longitude: &str, height: &str) -> Result<Self, FormatError> {
        Ok(Self::new(
            N::parse(latitude)?,
            N::parse(longitude)?,
            N::parse(height)?,
        ))
    }

    /// Replaces all three coordinates, renormalizing.
    pub fn set(&mut self, latitude: N, longitude: N, height: N) {
        self.latitude = latitude;
        self.longitude = longitude;
        self.height = height;
        self.normalize();
    }

    /// Replaces all three coordinates from textual literals.
    pub fn set_from_strs(
        &mut self,
        latitude: &str,
        longitude: &str,
        height: &str,
    ) -> Result<(), FormatError> {
        self.set(N::parse(latitude)?, N::parse(longitude)?, N::parse(height)?);
        Ok(())
    }

    pub fn latitude(&self) -> N {
        self.latitude
    }

    pub fn longitude(&self) -> N {
        self.longitude
    }

    pub fn height(&self) -> N {
        self.height
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: LocationKind) {
        self.kind = kind;
    }

    /// Area radius in meters; meaningful for [`LocationKind::Radius`].
    pub fn radius_meters(&self) -> u32 {
        self.radius_meters
    }

    pub fn set_radius_meters(&mut self, radius_meters: u32) {
        self.radius_meters = radius_meters;
    }

    /// Latitude rendered at the process-wide precision.
    pub fn latitude_string(&self) -> String {
        round_to_string(self.latitude.to_f64())
    }

    /// Longitude rendered at the process-wide precision.
    pub fn longitude_string(&self) -> String {
        round_to_string(self.longitude.to_f64())
    }

    /// Height rendered at the process-wide precision.
    pub fn height_string(&self) -> String {
        round_to_string(self.height.to_f64())
    }

    /// Great-circle surface distance in meters to another location.
    pub fn distance_to(&self, other: &Self) -> N {
        distance::distance(self, other)
    }

    /// Distance rendered at the process-wide precision.
    pub fn distance_string(&self, other: &Self) -> String {
        round_to_string(self.distance_to(other).to_f64())
    }

    fn normalize(&mut self) {
        self.latitude = normalize_latitude(self.latitude);
        self.longitude = normalize_longitude(self.longitude);
    }

    // Canonical display form, the basis for equality and hashing.
    fn rounded_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.latitude_string(),
            self.longitude_string(),
            self.height_string()
        )
    }
}

impl<N: Scalar> Default for Location<N> {
    fn default() -> Self {
        Self::new(N::from_i32(0), N::from_i32(0), N::from_i32(0))
    }
}

impl<N: Scalar> PartialEq for Location<N> {
    fn eq(&self, other: &Self) -> bool {
        self.rounded_key() == other.rounded_key()
    }
}

impl<N: Scalar> Eq for Location<N> {}

impl<N: Scalar> Hash for Location<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rounded_key().hash(state);
    }
}

impl<N: Scalar> fmt::Display for Location<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat {} lon {} height {}",
            self.latitude_string(),
            self.longitude_string(),
            self.height_string()
        )
    }
}

/// Folds a raw latitude into `[-90, 90]`.
///
/// The angle is first reduced by whole turns into `(-360, 360)`, then
/// folded over the nearest pole: walking past a pole comes back down the
/// far side of the globe.
pub(crate) fn normalize_latitude<N: Scalar>(value: N) -> N {
    let d0 = N::from_i32(0);
    let d90 = N::from_i32(90);
    let d180 = N::from_i32(180);
    let d270 = N::from_i32(270);
    let d360 = N::from_i32(360);

    let lat = value - value.full_turns() * d360;

    if lat >= d0 && lat < d90 {
        lat
    } else if lat >= d90 && lat < d180 {
        d180 - lat
    } else if lat >= d180 && lat < d270 {
        -(lat - d180)
    } else if lat >= d270 && lat < d360 {
        lat - d360
    } else if lat <= d0 && lat > -d90 {
        lat
    } else if lat <= -d90 && lat > -d180 {
        -(d180 + lat)
    } else if lat <= -d180 && lat > -d270 {
        -(lat + d180)
    } else if lat <= -d270 && lat > -d360 {
        lat + d360
    } else {
        // Unreachable for finite inputs after turn reduction.
        lat
    }
}

/// Folds a raw longitude into `(-180, 180]`, wrapping around the
/// antimeridian. Exactly -180 maps to +180.
pub(crate) fn normalize_longitude<N: Scalar>(value: N) -> N {
    let d0 = N::from_i32(0);
    let d180 = N::from_i32(180);
    let d360 = N::from_i32(360);

    let lon = value - value.full_turns() * d360;

    if lon >= d0 && lon <= d180 {
        lon
    } else if lon > d180 && lon < d360 {
        lon - d360
    } else if lon <= d0 && lon > -d180 {
        lon
    } else if lon <= -d180 && lon > -d360 {
        lon + d360
    } else {
        lon
    }
}
