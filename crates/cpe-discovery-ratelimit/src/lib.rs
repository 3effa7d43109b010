// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! Process-wide rate limiting and TTL-bounded response caching (§4.E).
//!
//! The two concerns share a single lock, per §5's "a single mutex
//! protecting both suffices" guidance: the cache lookup and the
//! rate-limit gate both need to happen before the outbound call is made,
//! and locking them together is what gives concurrent callers their
//! implicit FIFO ordering.

mod clock;

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;

pub use clock::{Clock, SystemClock};

#[derive(Clone)]
struct CacheEntry<V> {
    payload: V,
    inserted_at: tokio::time::Instant,
}

struct State<V> {
    last_request_at: Option<tokio::time::Instant>,
    entries: HashMap<String, CacheEntry<V>>,
}

/// Builds the cache key §4.E specifies: a fingerprint of
/// `(exactCpeOrEmpty, keywordOrEmpty)`.
pub fn fingerprint(exact: Option<&str>, keyword: Option<&str>) -> String {
    format!("exact={}|keyword={}", exact.unwrap_or(""), keyword.unwrap_or(""))
}

/// A process-wide rate limiter and TTL cache over outbound catalog calls.
///
/// `V` is the cached payload type (the caller's parsed catalog response);
/// it is never inspected here, only cloned out of the cache.
pub struct RateLimitedCache<V> {
    min_interval: Duration,
    ttl: Duration,
    clock: Box<dyn Clock>,
    state: Mutex<State<V>>,
}

impl<V: Clone> RateLimitedCache<V> {
    pub fn new(min_interval: Duration, ttl: Duration) -> Self {
        Self::with_clock(min_interval, ttl, Box::new(SystemClock))
    }

    pub fn with_clock(min_interval: Duration, ttl: Duration, clock: Box<dyn Clock>) -> Self {
        RateLimitedCache {
            min_interval,
            ttl,
            clock,
            state: Mutex::new(State {
                last_request_at: None,
                entries: HashMap::new(),
            }),
        }
    }

    /// Returns a fresh cache entry for `key` without touching the
    /// rate-limit gate. Evicts the entry if it has expired.
    pub async fn peek(&self, key: &str) -> Option<V> {
        let mut guard = self.state.lock().await;
        let now = self.clock.now();
        if let Some(entry) = guard.entries.get(key) {
            if now.duration_since(entry.inserted_at) < self.ttl {
                return Some(entry.payload.clone());
            }
        }
        guard.entries.remove(key);
        None
    }

    /// The full §4.E lookup: serve a fresh cache entry immediately, or
    /// gate on the rate limiter, run `fetch`, and cache the result.
    ///
    /// `last_request_at` is updated *before* `fetch` runs, while the lock
    /// is still held, so concurrent callers queue on the mutex itself
    /// rather than racing each other through the gate.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: String, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let mut guard = self.state.lock().await;

        let now = self.clock.now();
        if let Some(entry) = guard.entries.get(&key) {
            if now.duration_since(entry.inserted_at) < self.ttl {
                tracing::debug!(key = %key, "cache hit, skipping outbound call");
                return Ok(entry.payload.clone());
            }
            guard.entries.remove(&key);
        }

        let next_allowed = guard
            .last_request_at
            .map(|last| last + self.min_interval)
            .unwrap_or(now);
        if next_allowed > now {
            let wait = next_allowed - now;
            tracing::debug!(key = %key, wait_ms = wait.as_millis(), "rate limit gate");
            tokio::time::sleep_until(next_allowed).await;
        }
        guard.last_request_at = Some(self.clock.now());
        drop(guard);

        let value = fetch().await?;

        let mut guard = self.state.lock().await;
        guard.entries.insert(
            key,
            CacheEntry {
                payload: value.clone(),
                inserted_at: self.clock.now(),
            },
        );
        Ok(value)
    }
}
