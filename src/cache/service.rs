//! Caching front for a resolver chain.

use std::sync::Arc;

use tokio::task;
use tracing::{debug, warn};

use super::coalesce::{CoalesceOutcome, ResolveCoalescer};
use super::config::ResolutionCacheConfig;
use super::store::{CacheStore, StoreError, TtlOverride};
use super::CacheStats;
use crate::location::GeocodedLocation;
use crate::resolver::{Resolver, ResolverChain};
use crate::status::{PrecisionCode, StatusCode};

const NAME: &str = "ResolutionCache";

/// Caches resolver chain results keyed by the raw place text.
///
/// Guarantees each place text is resolved at most once at a time: a
/// cache miss registers with the coalescer, and only the winning task
/// runs the chain (on a blocking worker, since resolvers may block on
/// network calls). Concurrent misses on the same key wait for the
/// winner's broadcast instead of resolving again.
///
/// Lifetimes are differentiated on write by a store observer installed
/// at construction: successful results get the configured TTL and idle
/// windows (or no expiry when `eternal` is set), unsuccessful results
/// get the short negative TTL so upstream failures are retried soon.
pub struct ResolutionCache {
    chain: Arc<ResolverChain>,
    store: Arc<dyn CacheStore>,
    coalescer: ResolveCoalescer,
    config: ResolutionCacheConfig,
}

impl ResolutionCache {
    /// Wraps a resolver chain with a backing store.
    ///
    /// Installs the lifetime-differentiating write observer on the
    /// store, replacing any observer already present.
    pub fn new(
        chain: ResolverChain,
        store: Arc<dyn CacheStore>,
        config: ResolutionCacheConfig,
    ) -> Self {
        let negative_ttl = config.negative_ttl;
        store.set_write_observer(Arc::new(move |_key, value: &GeocodedLocation| {
            if value.is_success() {
                None
            } else {
                Some(TtlOverride {
                    ttl: negative_ttl,
                    idle: negative_ttl,
                })
            }
        }));
        Self {
            chain: Arc::new(chain),
            store,
            coalescer: ResolveCoalescer::new(),
            config,
        }
    }

    /// Resolves a place description, consulting the cache first.
    ///
    /// Store failures are isolated: an unreachable store yields a
    /// synthesized internal-error result rather than a panic or a
    /// propagated error, so callers always get a classified record.
    pub async fn resolve(&self, place_text: &str) -> GeocodedLocation {
        match self.store.get(place_text) {
            Ok(Some(cached)) => {
                debug!(place_text, "cache hit");
                return cached;
            }
            Ok(None) => {}
            Err(err) => return self.store_failure(place_text, &err),
        }

        match self.coalescer.register(place_text).await {
            CoalesceOutcome::Wait(mut receiver) => match receiver.recv().await {
                Ok(result) => result,
                // The winner went away without publishing; resolve
                // directly rather than strand the caller.
                Err(_) => self.run_chain(place_text).await,
            },
            CoalesceOutcome::New => self.resolve_as_winner(place_text).await,
        }
    }

    async fn resolve_as_winner(&self, place_text: &str) -> GeocodedLocation {
        // A previous winner may have written the key between our miss
        // and our registration; re-check before paying for the chain.
        let result = match self.store.get(place_text) {
            Ok(Some(cached)) => cached,
            Ok(None) => {
                let result = self.run_chain(place_text).await;
                match self.store_result(place_text, &result) {
                    Ok(()) => result,
                    Err(err) => self.store_failure(place_text, &err),
                }
            }
            Err(err) => self.store_failure(place_text, &err),
        };
        self.coalescer.complete(place_text, result.clone()).await;
        result
    }

    async fn run_chain(&self, place_text: &str) -> GeocodedLocation {
        let chain = Arc::clone(&self.chain);
        let owned = place_text.to_string();
        match task::spawn_blocking(move || chain.resolve(&owned)).await {
            Ok(result) => result,
            Err(err) => {
                warn!(place_text, %err, "resolver task failed");
                self.synthesize_error(place_text)
            }
        }
    }

    fn store_result(&self, key: &str, result: &GeocodedLocation) -> Result<(), StoreError> {
        let (ttl, idle) = if self.config.eternal {
            (None, None)
        } else {
            (Some(self.config.default_ttl), Some(self.config.default_idle))
        };
        self.store.put_with_ttl(key, result.clone(), ttl, idle)
    }

    fn store_failure(&self, place_text: &str, err: &StoreError) -> GeocodedLocation {
        warn!(place_text, %err, "cache store failure");
        self.synthesize_error(place_text)
    }

    fn synthesize_error(&self, place_text: &str) -> GeocodedLocation {
        let mut record = GeocodedLocation::new(
            place_text.trim(),
            StatusCode::ResolverError,
            PrecisionCode::Unknown,
            "",
            0.0,
            0.0,
            0.0,
        );
        record.set_resolver_id(&format!("{NAME} {}", crate::VERSION));
        record
    }

    /// Point-in-time cache counters.
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            store: self.store.stats(),
            coalescer: self.coalescer.stats().await,
        }
    }

    /// Drops every cached entry in every tier.
    pub fn evict_all(&self) {
        self.store.evict_all();
    }

    /// Flushes the backing store ahead of teardown; cached entries stay
    /// reachable through the terminal tier.
    pub fn shutdown(&self) {
        debug!("resolution cache shutting down");
        self.store.shutdown();
    }
}
