//! Ordered chain of resolvers with first-success semantics.

use tracing::{debug, trace};

use super::Resolver;
use crate::location::GeocodedLocation;
use crate::status::{PrecisionCode, StatusCode};

/// Name reported by [`ResolverChain`] itself.
pub const CHAIN_NAME: &str = "ResolverChain";

/// Runs resolvers in priority order until one succeeds.
///
/// The first successful result wins and is stamped with the winning
/// resolver's identity. When every resolver fails, the last resolver's
/// result is returned exactly as produced, so its specific failure
/// status survives to the caller. An empty chain synthesizes an
/// unknown-address result stamped with the chain's own identity.
///
/// The chain is itself a [`Resolver`], so chains nest.
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a resolver at the lowest priority.
    pub fn append(&mut self, resolver: Box<dyn Resolver>) {
        self.resolvers.push(resolver);
    }

    /// Inserts a resolver at the given priority position, zero being
    /// consulted first. Positions past the end clamp to an append.
    pub fn insert_at(&mut self, position: usize, resolver: Box<dyn Resolver>) {
        let position = position.min(self.resolvers.len());
        self.resolvers.insert(position, resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    fn synthesize_unresolved(&self, place_text: &str) -> GeocodedLocation {
        let mut record = GeocodedLocation::new(
            place_text.trim(),
            StatusCode::UnknownAddress,
            PrecisionCode::Unknown,
            "",
            0.0,
            0.0,
            0.0,
        );
        record.set_resolver_id(&self.identity());
        record
    }
}

impl Resolver for ResolverChain {
    fn resolve(&self, place_text: &str) -> GeocodedLocation {
        let mut last: Option<GeocodedLocation> = None;
        for resolver in &self.resolvers {
            let mut result = resolver.resolve(place_text);
            trace!(
                resolver = resolver.name(),
                status = %result.status(),
                "consulted resolver"
            );
            if result.is_success() {
                result.set_resolver_id(&resolver.identity());
                debug!(resolver = resolver.name(), place_text, "resolved");
                return result;
            }
            last = Some(result);
        }
        match last {
            // Every resolver failed; the last result passes through
            // verbatim so its failure status is not masked.
            Some(result) => result,
            None => self.synthesize_unresolved(place_text),
        }
    }

    fn resolve_into(&self, record: &mut GeocodedLocation) {
        record.reset_unresolved();
        record.set_resolver_id(&self.identity());
        for resolver in &self.resolvers {
            resolver.resolve_into(record);
            if record.is_success() {
                record.set_resolver_id(&resolver.identity());
                return;
            }
        }
    }

    fn name(&self) -> &str {
        CHAIN_NAME
    }

    fn version(&self) -> &str {
        crate::VERSION
    }
}
