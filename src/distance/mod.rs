//! Great-circle surface distance over the WGS84 ellipsoid.
//!
//! Haversine on a sphere whose radius is corrected for the ellipsoid at
//! the origin point's latitude. The computation is generic over the
//! coordinate representation: linear steps (differences, products, the
//! shorter-arc selection) run in the caller's [`Scalar`] type, while the
//! transcendental steps materialize through `f64` and wrap back. Both
//! representations therefore agree to well within a part per million.

use std::f64::consts::TAU;

use crate::location::{Location, Scalar};

/// WGS84 semi-major axis, meters.
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = 0.006_694_379_990_13;

/// Surface distance in meters from `origin` to `end`.
///
/// The ellipsoid-corrected radius is evaluated at `origin`'s latitude,
/// so the result is exactly symmetric only when the two latitudes are
/// equal. Heights do not participate.
pub fn distance<N: Scalar>(origin: &Location<N>, end: &Location<N>) -> N {
    let rlat1 = origin.latitude().to_f64().to_radians();
    let rlon1 = origin.longitude().to_f64().to_radians();
    let rlat2 = end.latitude().to_f64().to_radians();
    let rlon2 = end.longitude().to_f64().to_radians();

    // Gaussian-corrected sphere radius at the origin latitude.
    let radius = (WGS84_A * (1.0 - WGS84_E2).sqrt()) / (1.0 - WGS84_E2 * rlat1.sin().powi(2));

    let two_pi = N::from_f64(TAU);
    let a1 = N::from_f64(rlat1);
    let a2 = N::from_f64(rlat2);
    let b1 = N::from_f64(rlon1);
    let b2 = N::from_f64(rlon2);

    // Shorter-arc angular separations, taken in the scalar representation.
    let dlat = (a2 - a1).abs().min((two_pi - a2 - a1).abs());
    let dlon = (b2 - b1).abs().min((two_pi - b2 - b1).abs());

    let sin_half_lat = N::from_f64((dlat.to_f64() / 2.0).sin());
    let sin_half_lon = N::from_f64((dlon.to_f64() / 2.0).sin());
    let cos_lat1 = N::from_f64(rlat1.cos());
    let cos_lat2 = N::from_f64(rlat2.cos());

    let x = sin_half_lat * sin_half_lat + cos_lat1 * cos_lat2 * sin_half_lon * sin_half_lon;

    // Clamp guards rounding just past 1 before the inverse sine.
    let c = 2.0 * x.to_f64().sqrt().min(1.0).asin();

    N::from_f64(radius) * N::from_f64(c)
}
