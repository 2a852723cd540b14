//! Resolution cache tuning.

use std::time::Duration;

/// Tuning for the resolution cache and its backing store.
///
/// Built with chained setters over [`Default`]:
///
/// ```
/// use std::time::Duration;
/// use georesolve::cache::ResolutionCacheConfig;
///
/// let config = ResolutionCacheConfig::default()
///     .with_max_memory_entries(500)
///     .with_negative_ttl(Duration::from_secs(30));
/// assert_eq!(config.max_memory_entries, 500);
/// ```
#[derive(Debug, Clone)]
pub struct ResolutionCacheConfig {
    /// Capacity of the in-memory tier before entries spill to overflow.
    pub max_memory_entries: usize,
    /// Capacity of the overflow tier.
    pub max_overflow_entries: usize,
    /// How often the overflow tier is swept for expired entries.
    pub overflow_sweep_interval: Duration,
    /// Lifetime of a successful entry from the moment it is written.
    pub default_ttl: Duration,
    /// Longest a successful entry may go unread before it expires.
    pub default_idle: Duration,
    /// When set, successful entries never expire. Unsuccessful entries
    /// still expire on the negative TTL.
    pub eternal: bool,
    /// Lifetime of an unsuccessful entry. Short, so transient upstream
    /// failures are retried soon while still absorbing bursts.
    pub negative_ttl: Duration,
}

impl Default for ResolutionCacheConfig {
    fn default() -> Self {
        Self {
            max_memory_entries: 2_000,
            max_overflow_entries: 40_000,
            overflow_sweep_interval: Duration::from_secs(6 * 60 * 60),
            default_ttl: Duration::from_secs(21 * 24 * 60 * 60),
            default_idle: Duration::from_secs(14 * 24 * 60 * 60),
            eternal: false,
            negative_ttl: Duration::from_secs(10),
        }
    }
}

impl ResolutionCacheConfig {
    pub fn with_max_memory_entries(mut self, max_memory_entries: usize) -> Self {
        self.max_memory_entries = max_memory_entries;
        self
    }

    pub fn with_max_overflow_entries(mut self, max_overflow_entries: usize) -> Self {
        self.max_overflow_entries = max_overflow_entries;
        self
    }

    pub fn with_overflow_sweep_interval(mut self, interval: Duration) -> Self {
        self.overflow_sweep_interval = interval;
        self
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn with_default_idle(mut self, idle: Duration) -> Self {
        self.default_idle = idle;
        self
    }

    pub fn with_eternal(mut self, eternal: bool) -> Self {
        self.eternal = eternal;
        self
    }

    pub fn with_negative_ttl(mut self, negative_ttl: Duration) -> Self {
        self.negative_ttl = negative_ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolutionCacheConfig::default();
        assert_eq!(config.max_memory_entries, 2_000);
        assert_eq!(config.max_overflow_entries, 40_000);
        assert_eq!(config.overflow_sweep_interval, Duration::from_secs(21_600));
        assert_eq!(config.default_ttl, Duration::from_secs(1_814_400));
        assert_eq!(config.default_idle, Duration::from_secs(1_209_600));
        assert!(!config.eternal);
        assert_eq!(config.negative_ttl, Duration::from_secs(10));
    }

    #[test]
    fn test_builder_chain() {
        let config = ResolutionCacheConfig::default()
            .with_max_memory_entries(10)
            .with_max_overflow_entries(20)
            .with_default_ttl(Duration::from_secs(60))
            .with_default_idle(Duration::from_secs(30))
            .with_eternal(true)
            .with_negative_ttl(Duration::from_millis(250));
        assert_eq!(config.max_memory_entries, 10);
        assert_eq!(config.max_overflow_entries, 20);
        assert_eq!(config.default_ttl, Duration::from_secs(60));
        assert_eq!(config.default_idle, Duration::from_secs(30));
        assert!(config.eternal);
        assert_eq!(config.negative_ttl, Duration::from_millis(250));
    }
}
