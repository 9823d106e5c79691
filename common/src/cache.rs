use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::debug;

use crate::clock::{Clock, SystemClock};

pub const DEFAULT_TTL_SECS: i64 = 60;

/// A payload together with the moment it was fetched.
#[derive(Debug, Clone)]
pub struct CachedResponse<T> {
    pub payload: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> CachedResponse<T> {
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.fetched_at < ttl
    }
}

type InFlight<T, E> = Shared<BoxFuture<'static, Result<T, E>>>;

/// Retires a flight whose fetch panicked, so the poisoned future is never
/// joined again.
struct UnwindGuard<'a, T, E> {
    in_flight: &'a Mutex<HashMap<String, InFlight<T, E>>>,
    key: &'a str,
    flight: &'a InFlight<T, E>,
}

impl<T, E> Drop for UnwindGuard<'_, T, E> {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            return;
        }
        let mut in_flight = self.in_flight.lock();
        if in_flight
            .get(self.key)
            .is_some_and(|current| current.ptr_eq(self.flight))
        {
            in_flight.remove(self.key);
        }
    }
}

/// Keyed response cache with a fixed time-to-live.
///
/// Entries are never evicted eagerly: once older than the TTL they are
/// ignored and overwritten by the next successful fetch. Concurrent misses on
/// the same key share a single in-flight fetch, and a failed fetch leaves the
/// cache untouched.
pub struct ResponseCache<T, E> {
    entries: Mutex<HashMap<String, CachedResponse<T>>>,
    in_flight: Mutex<HashMap<String, InFlight<T, E>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T, E> ResponseCache<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached payload if it is still fresh.
    pub fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        self.entries
            .lock()
            .get(key)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.payload.clone())
    }

    pub fn set(&self, key: impl Into<String>, payload: T) {
        let entry = CachedResponse {
            payload,
            fetched_at: self.clock.now(),
        };
        self.entries.lock().insert(key.into(), entry);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns the fresh payload for `key`, or runs `fetch` and stores its
    /// successful result.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let flight = {
            let mut in_flight = self.in_flight.lock();
            if let Some(payload) = self.get(key) {
                debug!(key = %key, "cache hit");
                return Ok(payload);
            }
            match in_flight.get(key) {
                Some(flight) => {
                    debug!(key = %key, "joining in-flight fetch");
                    flight.clone()
                }
                None => {
                    debug!(key = %key, "cache miss");
                    let flight = fetch().boxed().shared();
                    in_flight.insert(key.to_string(), flight.clone());
                    flight
                }
            }
        };

        let result = {
            let _guard = UnwindGuard {
                in_flight: &self.in_flight,
                key,
                flight: &flight,
            };
            flight.clone().await
        };

        // Whoever observes completion first retires the flight.
        let mut in_flight = self.in_flight.lock();
        if in_flight
            .get(key)
            .is_some_and(|current| current.ptr_eq(&flight))
        {
            in_flight.remove(key);
            if let Ok(payload) = &result {
                self.set(key, payload.clone());
            }
        }

        result
    }
}
