//! Cache store collaborator: the pluggable backing tier for resolution
//! results.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, trace};

use crate::location::GeocodedLocation;

/// A store-level failure. Stores are collaborators that may sit on
/// fallible media, so reads report errors instead of panicking.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache store unavailable: {0}")]
    Unavailable(String),
    #[error("cache store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-entry lifetime override returned by a write observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlOverride {
    pub ttl: Duration,
    pub idle: Duration,
}

/// Hook consulted synchronously on every write, before the entry lands.
/// Returning `Some` replaces the lifetimes the writer asked for; the
/// override is re-evaluated on every subsequent write of the same key.
pub type WriteObserver = Arc<dyn Fn(&str, &GeocodedLocation) -> Option<TtlOverride> + Send + Sync>;

/// Point-in-time counters for a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Live entries across all tiers.
    pub object_count: usize,
    pub memory_hits: u64,
    pub overflow_hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl StoreStats {
    /// Hits across all tiers.
    pub fn hits(&self) -> u64 {
        self.memory_hits + self.overflow_hits
    }
}

/// Backing store for resolution results.
///
/// Keys are the raw place text. Lifetimes are per entry: `ttl` bounds
/// total age, `idle` bounds time since last read, and `None` means
/// unbounded. Implementations are internally synchronized.
pub trait CacheStore: Send + Sync {
    /// Looks up a live entry, refreshing its idle clock on a hit.
    fn get(&self, key: &str) -> Result<Option<GeocodedLocation>, StoreError>;

    /// Writes an entry with the given lifetimes, subject to the write
    /// observer's override.
    fn put_with_ttl(
        &self,
        key: &str,
        value: GeocodedLocation,
        ttl: Option<Duration>,
        idle: Option<Duration>,
    ) -> Result<(), StoreError>;

    /// Installs the write observer. At most one is active; installing
    /// replaces any previous observer.
    fn set_write_observer(&self, observer: WriteObserver);

    /// Drops every entry in every tier.
    fn evict_all(&self);

    fn stats(&self) -> StoreStats;

    /// Orderly flush ahead of teardown. Tiered implementations drain
    /// upper tiers into the terminal tier; live entries stay reachable
    /// through `get` afterward.
    fn shutdown(&self);
}

struct StoreEntry {
    value: GeocodedLocation,
    inserted_at: Instant,
    last_access: Instant,
    ttl: Option<Duration>,
    idle: Option<Duration>,
}

impl StoreEntry {
    fn is_expired(&self, now: Instant) -> bool {
        if let Some(ttl) = self.ttl {
            if now.duration_since(self.inserted_at) >= ttl {
                return true;
            }
        }
        if let Some(idle) = self.idle {
            if now.duration_since(self.last_access) >= idle {
                return true;
            }
        }
        false
    }

    fn remaining_ttl(&self, now: Instant) -> Option<Duration> {
        self.ttl
            .map(|ttl| ttl.saturating_sub(now.duration_since(self.inserted_at)))
    }
}

struct MemoryStoreInner {
    entries: HashMap<String, StoreEntry>,
    last_sweep: Instant,
    memory_hits: u64,
    overflow_hits: u64,
    misses: u64,
    evictions: u64,
}

/// Bounded in-memory store with lazy per-entry expiry, periodic sweeps,
/// least-recently-used eviction, and an optional overflow tier that
/// absorbs entries evicted for capacity.
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
    observer: Mutex<Option<WriteObserver>>,
    overflow: Option<Box<dyn CacheStore>>,
    max_entries: usize,
    sweep_interval: Duration,
}

impl MemoryStore {
    pub fn new(max_entries: usize, sweep_interval: Duration) -> Self {
        Self {
            inner: Mutex::new(MemoryStoreInner {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
                memory_hits: 0,
                overflow_hits: 0,
                misses: 0,
                evictions: 0,
            }),
            observer: Mutex::new(None),
            overflow: None,
            max_entries,
            sweep_interval,
        }
    }

    /// Attaches an overflow tier that receives capacity evictions.
    pub fn with_overflow(mut self, overflow: Box<dyn CacheStore>) -> Self {
        self.overflow = Some(overflow);
        self
    }

    /// Builds the standard two-tier layout from cache config: a memory
    /// tier backed by a larger overflow tier.
    pub fn two_tier(config: &super::ResolutionCacheConfig) -> Self {
        let overflow = MemoryStore::new(config.max_overflow_entries, config.overflow_sweep_interval);
        MemoryStore::new(config.max_memory_entries, config.overflow_sweep_interval)
            .with_overflow(Box::new(overflow))
    }

    fn maybe_sweep(&self, inner: &mut MemoryStoreInner, now: Instant) {
        if now.duration_since(inner.last_sweep) < self.sweep_interval {
            return;
        }
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired(now));
        let swept = before - inner.entries.len();
        if swept > 0 {
            debug!(swept, "swept expired cache entries");
            inner.evictions += swept as u64;
        }
        inner.last_sweep = now;
    }

    // Makes room for one more entry, spilling the least recently used
    // live entry to the overflow tier when present.
    fn evict_for_capacity(&self, inner: &mut MemoryStoreInner, now: Instant) {
        inner.entries.retain(|_, entry| !entry.is_expired(now));
        while inner.entries.len() >= self.max_entries {
            let Some(victim_key) = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(key, _)| key.clone())
            else {
                return;
            };
            let Some(entry) = inner.entries.remove(&victim_key) else {
                return;
            };
            inner.evictions += 1;
            if let Some(overflow) = &self.overflow {
                trace!(key = %victim_key, "spilling entry to overflow tier");
                let remaining = entry.remaining_ttl(now);
                if let Err(err) =
                    overflow.put_with_ttl(&victim_key, entry.value, remaining, entry.idle)
                {
                    debug!(key = %victim_key, %err, "overflow spill failed, entry dropped");
                }
            }
        }
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<GeocodedLocation>, StoreError> {
        let now = Instant::now();
        let mut inner = self.inner.lock().unwrap();
        self.maybe_sweep(&mut inner, now);

        if let Some(entry) = inner.entries.get_mut(key) {
            if entry.is_expired(now) {
                inner.entries.remove(key);
                inner.evictions += 1;
            } else {
                entry.last_access = now;
                let value = entry.value.clone();
                inner.memory_hits += 1;
                return Ok(Some(value));
            }
        }

        if let Some(overflow) = &self.overflow {
            if let Some(value) = overflow.get(key)? {
                inner.overflow_hits += 1;
                return Ok(Some(value));
            }
        }

        inner.misses += 1;
        Ok(None)
    }

    fn put_with_ttl(
        &self,
        key: &str,
        value: GeocodedLocation,
        ttl: Option<Duration>,
        idle: Option<Duration>,
    ) -> Result<(), StoreError> {
        let (ttl, idle) = {
            let observer = self.observer.lock().unwrap();
            match observer.as_deref().and_then(|observe| observe(key, &value)) {
                Some(lifetime) => (Some(lifetime.ttl), Some(lifetime.idle)),
                None => (ttl, idle),
            }
        };

        let now = Instant::now();
        let mut inner = self.inner.lock().unwrap();
        if !inner.entries.contains_key(key) && inner.entries.len() >= self.max_entries {
            self.evict_for_capacity(&mut inner, now);
        }
        inner.entries.insert(
            key.to_string(),
            StoreEntry {
                value,
                inserted_at: now,
                last_access: now,
                ttl,
                idle,
            },
        );
        Ok(())
    }

    fn set_write_observer(&self, observer: WriteObserver) {
        *self.observer.lock().unwrap() = Some(observer);
    }

    fn evict_all(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        if let Some(overflow) = &self.overflow {
            overflow.evict_all();
        }
    }

    fn stats(&self) -> StoreStats {
        let inner = self.inner.lock().unwrap();
        let overflow_count = self
            .overflow
            .as_ref()
            .map(|overflow| overflow.stats().object_count)
            .unwrap_or(0);
        StoreStats {
            object_count: inner.entries.len() + overflow_count,
            memory_hits: inner.memory_hits,
            overflow_hits: inner.overflow_hits,
            misses: inner.misses,
            evictions: inner.evictions,
        }
    }

    fn shutdown(&self) {
        let mut inner = self.inner.lock().unwrap();
        let now = Instant::now();
        // A terminal tier holds its entries; only tiers with an overflow
        // behind them drain.
        if let Some(overflow) = &self.overflow {
            for (key, entry) in inner.entries.drain() {
                if entry.is_expired(now) {
                    continue;
                }
                let remaining = entry.remaining_ttl(now);
                if let Err(err) = overflow.put_with_ttl(&key, entry.value, remaining, entry.idle) {
                    debug!(%key, %err, "flush to overflow failed on shutdown");
                }
            }
            overflow.shutdown();
        }
        debug!("cache store shut down");
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::status::{PrecisionCode, StatusCode};

    fn success(place: &str) -> GeocodedLocation {
        GeocodedLocation::new(
            place,
            StatusCode::Success,
            PrecisionCode::Town,
            "US",
            42.0,
            -71.0,
            0.0,
        )
    }

    fn failure(place: &str) -> GeocodedLocation {
        GeocodedLocation::new(
            place,
            StatusCode::ServerError,
            PrecisionCode::Unknown,
            "",
            0.0,
            0.0,
            0.0,
        )
    }

    fn long() -> Option<Duration> {
        Some(Duration::from_secs(3600))
    }

    #[test]
    fn test_put_then_get() {
        let store = MemoryStore::new(10, Duration::from_secs(3600));
        store
            .put_with_ttl("boston", success("boston"), long(), long())
            .unwrap();

        let hit = store.get("boston").unwrap().unwrap();
        assert_eq!(hit.place_name(), "boston");
        assert!(store.get("nowhere").unwrap().is_none());

        let stats = store.stats();
        assert_eq!(stats.object_count, 1);
        assert_eq!(stats.memory_hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_absolute_ttl_expires_entries() {
        let store = MemoryStore::new(10, Duration::from_secs(3600));
        store
            .put_with_ttl(
                "short",
                success("short"),
                Some(Duration::from_millis(20)),
                long(),
            )
            .unwrap();

        assert!(store.get("short").unwrap().is_some());
        thread::sleep(Duration::from_millis(40));
        assert!(store.get("short").unwrap().is_none());
    }

    #[test]
    fn test_idle_clock_refreshes_on_read() {
        let store = MemoryStore::new(10, Duration::from_secs(3600));
        store
            .put_with_ttl(
                "busy",
                success("busy"),
                long(),
                Some(Duration::from_millis(60)),
            )
            .unwrap();

        // Keep touching the entry inside its idle window.
        for _ in 0..3 {
            thread::sleep(Duration::from_millis(25));
            assert!(store.get("busy").unwrap().is_some());
        }
        // Then let it go idle past the window.
        thread::sleep(Duration::from_millis(90));
        assert!(store.get("busy").unwrap().is_none());
    }

    #[test]
    fn test_unbounded_lifetimes_never_expire() {
        let store = MemoryStore::new(10, Duration::from_millis(10));
        store
            .put_with_ttl("forever", success("forever"), None, None)
            .unwrap();
        thread::sleep(Duration::from_millis(30));
        // A sweep interval has passed; the entry must survive it.
        assert!(store.get("forever").unwrap().is_some());
    }

    #[test]
    fn test_capacity_eviction_spills_lru_to_overflow() {
        let overflow = MemoryStore::new(100, Duration::from_secs(3600));
        let store =
            MemoryStore::new(2, Duration::from_secs(3600)).with_overflow(Box::new(overflow));

        store.put_with_ttl("a", success("a"), long(), long()).unwrap();
        thread::sleep(Duration::from_millis(5));
        store.put_with_ttl("b", success("b"), long(), long()).unwrap();
        thread::sleep(Duration::from_millis(5));
        // Touch "a" so "b" becomes the least recently used.
        assert!(store.get("a").unwrap().is_some());
        thread::sleep(Duration::from_millis(5));
        store.put_with_ttl("c", success("c"), long(), long()).unwrap();

        // All three remain reachable, "b" via the overflow tier.
        assert!(store.get("a").unwrap().is_some());
        assert!(store.get("b").unwrap().is_some());
        assert!(store.get("c").unwrap().is_some());

        let stats = store.stats();
        assert_eq!(stats.object_count, 3);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.overflow_hits, 1);
    }

    #[test]
    fn test_write_observer_overrides_lifetimes() {
        let store = MemoryStore::new(10, Duration::from_secs(3600));
        store.set_write_observer(Arc::new(|_key, value: &GeocodedLocation| {
            if value.is_success() {
                None
            } else {
                Some(TtlOverride {
                    ttl: Duration::from_millis(20),
                    idle: Duration::from_millis(20),
                })
            }
        }));

        store.put_with_ttl("good", success("good"), long(), long()).unwrap();
        store.put_with_ttl("bad", failure("bad"), long(), long()).unwrap();

        thread::sleep(Duration::from_millis(40));
        assert!(store.get("good").unwrap().is_some());
        assert!(store.get("bad").unwrap().is_none());
    }

    #[test]
    fn test_write_observer_reapplies_on_rewrite() {
        let store = MemoryStore::new(10, Duration::from_secs(3600));
        store.set_write_observer(Arc::new(|_key, value: &GeocodedLocation| {
            if value.is_success() {
                None
            } else {
                Some(TtlOverride {
                    ttl: Duration::from_millis(20),
                    idle: Duration::from_millis(20),
                })
            }
        }));

        // A failure that upgrades to a success on rewrite gets the
        // writer's full lifetimes back.
        store.put_with_ttl("flaky", failure("flaky"), long(), long()).unwrap();
        store.put_with_ttl("flaky", success("flaky"), long(), long()).unwrap();
        thread::sleep(Duration::from_millis(40));
        assert!(store.get("flaky").unwrap().is_some());
    }

    #[test]
    fn test_evict_all_clears_every_tier() {
        let overflow = MemoryStore::new(100, Duration::from_secs(3600));
        let store =
            MemoryStore::new(1, Duration::from_secs(3600)).with_overflow(Box::new(overflow));
        store.put_with_ttl("a", success("a"), long(), long()).unwrap();
        store.put_with_ttl("b", success("b"), long(), long()).unwrap();
        assert_eq!(store.stats().object_count, 2);

        store.evict_all();
        assert_eq!(store.stats().object_count, 0);
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn test_shutdown_flushes_memory_tier_to_overflow() {
        let overflow = MemoryStore::new(100, Duration::from_secs(3600));
        let store =
            MemoryStore::new(10, Duration::from_secs(3600)).with_overflow(Box::new(overflow));
        store.put_with_ttl("a", success("a"), long(), long()).unwrap();
        store.put_with_ttl("b", success("b"), long(), long()).unwrap();

        store.shutdown();

        // Entries survive in the overflow tier.
        assert!(store.get("a").unwrap().is_some());
        assert_eq!(store.stats().overflow_hits, 1);
    }

    #[test]
    fn test_shutdown_of_terminal_tier_retains_entries() {
        let store = MemoryStore::new(10, Duration::from_secs(3600));
        store.put_with_ttl("a", success("a"), long(), long()).unwrap();

        store.shutdown();

        assert!(store.get("a").unwrap().is_some());
        assert_eq!(store.stats().object_count, 1);
    }

    #[test]
    fn test_two_tier_layout_from_config() {
        let config = super::super::ResolutionCacheConfig::default().with_max_memory_entries(1);
        let store = MemoryStore::two_tier(&config);
        store.put_with_ttl("a", success("a"), long(), long()).unwrap();
        store.put_with_ttl("b", success("b"), long(), long()).unwrap();
        assert!(store.get("a").unwrap().is_some());
        assert!(store.get("b").unwrap().is_some());
        assert_eq!(store.stats().object_count, 2);
    }
}
