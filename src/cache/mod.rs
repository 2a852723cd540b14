//! Caching layer for resolution results.
//!
//! [`ResolutionCache`] fronts a [`crate::resolver::ResolverChain`] with
//! a pluggable [`CacheStore`], coalescing concurrent misses so each
//! place text is resolved at most once at a time, and differentiating
//! entry lifetimes so failed resolutions are retried much sooner than
//! successful ones are refreshed.

mod coalesce;
mod config;
mod service;
mod store;

pub use coalesce::CoalescerStats;
pub use config::ResolutionCacheConfig;
pub use service::ResolutionCache;
pub use store::{CacheStore, MemoryStore, StoreError, StoreStats, TtlOverride, WriteObserver};

/// Combined point-in-time counters for the cache and its coalescer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheStats {
    pub store: StoreStats,
    pub coalescer: CoalescerStats,
}
