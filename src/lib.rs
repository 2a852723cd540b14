//! GeoResolve - place-description resolution with caching
//!
//! This library resolves a free-text place description (a street address, a
//! coordinate pair, an IP address, etc.) into a normalized geographic
//! location, using an ordered chain of pluggable resolver strategies, and
//! caches results so repeated lookups of the same description are cheap.
//!
//! # High-Level API
//!
//! For most use cases, compose a [`resolver::ResolverChain`] and wrap it in a
//! [`cache::ResolutionCache`]:
//!
//! ```ignore
//! use std::sync::Arc;
//! use georesolve::cache::{MemoryStore, ResolutionCache, ResolutionCacheConfig};
//! use georesolve::resolver::{LatLonResolver, ResolverChain};
//!
//! let mut chain = ResolverChain::new();
//! chain.append(Box::new(LatLonResolver::new()));
//!
//! let config = ResolutionCacheConfig::default();
//! let store = Arc::new(MemoryStore::two_tier(&config));
//! let cache = ResolutionCache::new(chain, store, config);
//!
//! let location = cache.resolve("42.128, -71.235").await;
//! ```

pub mod cache;
pub mod distance;
pub mod location;
pub mod resolver;
pub mod status;

/// Version of the GeoResolve library.
///
/// This is defined in `Cargo.toml` and injected at compile time. Resolver
/// identity stamps include it so cached records carry the version of the
/// code that produced them.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
