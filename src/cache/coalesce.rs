//! Coalesces concurrent resolutions of the same place text.
//!
//! When several tasks miss the cache on the same key at once, only the
//! first runs the resolver chain; the rest subscribe to a broadcast
//! channel and receive the winner's result. This keeps a thundering
//! herd of identical lookups down to a single upstream call.

use std::collections::HashMap;

use tokio::sync::{broadcast, Mutex};
use tracing::trace;

use crate::location::GeocodedLocation;

// Waiter slots per in-flight key. Resolution fan-in is bounded by the
// caller's concurrency, and a lagged waiter falls back to resolving on
// its own, so a modest buffer is enough.
const BROADCAST_CAPACITY: usize = 64;

/// Outcome of registering interest in a key.
pub(crate) enum CoalesceOutcome {
    /// This task is the first for the key and must perform the
    /// resolution, then call `complete`.
    New,
    /// Another task is already resolving the key; await the receiver.
    Wait(broadcast::Receiver<GeocodedLocation>),
}

/// Counters describing coalescer effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoalescerStats {
    pub total_requests: u64,
    pub new_requests: u64,
    pub coalesced_requests: u64,
}

impl CoalescerStats {
    /// Fraction of requests that piggybacked on an in-flight resolution.
    pub fn coalesce_ratio(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.coalesced_requests as f64 / self.total_requests as f64
        }
    }
}

pub(crate) struct ResolveCoalescer {
    in_flight: Mutex<HashMap<String, broadcast::Sender<GeocodedLocation>>>,
    stats: Mutex<CoalescerStats>,
}

impl ResolveCoalescer {
    pub(crate) fn new() -> Self {
        Self {
            in_flight: Mutex::new(HashMap::new()),
            stats: Mutex::new(CoalescerStats::default()),
        }
    }

    /// Registers interest in `key`, atomically deciding whether this
    /// task resolves or waits.
    pub(crate) async fn register(&self, key: &str) -> CoalesceOutcome {
        let mut in_flight = self.in_flight.lock().await;
        let mut stats = self.stats.lock().await;
        stats.total_requests += 1;

        if let Some(sender) = in_flight.get(key) {
            stats.coalesced_requests += 1;
            trace!(key, "coalescing onto in-flight resolution");
            return CoalesceOutcome::Wait(sender.subscribe());
        }

        stats.new_requests += 1;
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        in_flight.insert(key.to_string(), sender);
        CoalesceOutcome::New
    }

    /// Publishes the result for `key` and clears its in-flight slot.
    /// A send error only means no waiters subscribed.
    pub(crate) async fn complete(&self, key: &str, result: GeocodedLocation) {
        let sender = self.in_flight.lock().await.remove(key);
        if let Some(sender) = sender {
            let _ = sender.send(result);
        }
    }

    pub(crate) async fn stats(&self) -> CoalescerStats {
        *self.stats.lock().await
    }

    #[cfg(test)]
    pub(crate) async fn in_flight_count(&self) -> usize {
        self.in_flight.lock().await.len()
    }
}
