//! Place-description resolvers and the resolver chain.
//!
//! A [`Resolver`] turns a free-text place description into a
//! [`GeocodedLocation`]. Resolvers never fail at the call level; every
//! outcome, including "could not resolve", comes back as a record whose
//! status classifies what happened. [`ResolverChain`] runs a sequence of
//! resolvers in priority order and returns the first success.

mod chain;
mod latlon;

pub use chain::{ResolverChain, CHAIN_NAME};
pub use latlon::LatLonResolver;

use crate::location::GeocodedLocation;

/// A strategy for resolving free-text place descriptions.
pub trait Resolver: Send + Sync {
    /// Resolves a place description into a fresh record.
    ///
    /// Always returns a record; unresolvable input comes back with a
    /// non-success status rather than an error.
    fn resolve(&self, place_text: &str) -> GeocodedLocation;

    /// Resolves in place, overwriting only the resolution fields of an
    /// existing record. Caller-managed fields survive untouched, and
    /// the resolver identity stamp is left to the chain.
    fn resolve_into(&self, record: &mut GeocodedLocation) {
        let place_text = record.place_name().to_string();
        let fresh = self.resolve(&place_text);
        record.set_place_name(fresh.place_name());
        record.set_status(fresh.status());
        record.set_precision(fresh.precision());
        record.set_country_code(fresh.country_code());
        record.set_coordinates(fresh.latitude(), fresh.longitude(), fresh.height());
    }

    /// Short human-readable name of this resolver.
    fn name(&self) -> &str;

    /// Version string of this resolver.
    fn version(&self) -> &str;

    /// Provenance stamp recorded on successful results.
    fn identity(&self) -> String {
        format!("{} {}", self.name(), self.version())
    }
}
