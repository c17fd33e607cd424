use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use epidash_core::{CacheConfig, EntitySeries, EpidashError};
use lru::LruCache;
use tokio::sync::broadcast;

type FetchResult = Result<EntitySeries, EpidashError>;

struct Resident {
    series: EntitySeries,
    fetched_at: Instant,
}

struct Inner {
    resident: LruCache<String, Resident>,
    in_flight: HashMap<String, broadcast::Sender<FetchResult>>,
}

/// Bounded per-entity series cache with request de-duplication.
///
/// Resident entries are LRU-evicted beyond the configured capacity and
/// expire after the configured TTL. Per key the cache is in exactly one of
/// three states: absent, fetch-in-flight, or resident.
///
/// [`SeriesCache::get_or_fetch`] is single-flight: the first caller for an
/// uncached key becomes the leader and runs the fetch exactly once; every
/// concurrent caller for the same key subscribes to the leader's outcome
/// instead of firing its own fetch. A failed fetch clears the in-flight
/// marker, so the key is never poisoned and a later request can retry.
///
/// Entries are immutable after write and the internal lock is never held
/// across an await, so a plain mutex suffices.
pub struct SeriesCache {
    inner: Mutex<Inner>,
    ttl: Duration,
}

enum Role {
    Wait(broadcast::Receiver<FetchResult>),
    Lead,
}

impl SeriesCache {
    /// Build a cache from the injected capacity/TTL bounds.
    #[must_use]
    pub fn new(cfg: &CacheConfig) -> Self {
        // Avoid zero capacity panics
        let cap = cfg.capacity.max(1);
        let cap_nz = std::num::NonZeroUsize::new(cap).unwrap();
        Self {
            inner: Mutex::new(Inner {
                resident: LruCache::new(cap_nz),
                in_flight: HashMap::new(),
            }),
            ttl: cfg.ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the resident series for `entity_id`, if present and fresh.
    /// Expired entries are evicted on the way out.
    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<EntitySeries> {
        let mut inner = self.lock();
        if let Some(entry) = inner.resident.get(entity_id) {
            if entry.fetched_at.elapsed() <= self.ttl {
                return Some(entry.series.clone());
            }
            inner.resident.pop(entity_id);
        }
        None
    }

    /// Store a series for `entity_id`, overwriting any prior entry.
    pub fn put(&self, entity_id: impl Into<String>, series: EntitySeries) {
        let mut inner = self.lock();
        inner.resident.put(
            entity_id.into(),
            Resident {
                series,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Return the cached series for `entity_id`, or run `fetch` to produce it.
    ///
    /// Concurrent calls for the same uncached key share one outstanding
    /// fetch; only the leader invokes `fetch`. All waiters observe the same
    /// outcome, success or failure.
    ///
    /// # Errors
    /// Propagates the fetch error to the leader and every waiter. The
    /// in-flight marker is cleared first, so a subsequent call retries.
    pub async fn get_or_fetch<F, Fut>(&self, entity_id: &str, fetch: F) -> FetchResult
    where
        F: Fn() -> Fut,
        Fut: Future<Output = FetchResult>,
    {
        loop {
            let role = {
                let mut inner = self.lock();
                if let Some(entry) = inner.resident.get(entity_id) {
                    if entry.fetched_at.elapsed() <= self.ttl {
                        return Ok(entry.series.clone());
                    }
                    inner.resident.pop(entity_id);
                }
                if let Some(tx) = inner.in_flight.get(entity_id) {
                    Role::Wait(tx.subscribe())
                } else {
                    let (tx, _rx) = broadcast::channel(1);
                    inner.in_flight.insert(entity_id.to_string(), tx);
                    Role::Lead
                }
            };

            match role {
                Role::Wait(mut rx) => match rx.recv().await {
                    Ok(result) => return result,
                    // The leader vanished without publishing (its future was
                    // dropped). Go around: either become the new leader or
                    // find the entry another caller has since produced.
                    Err(_) => {}
                },
                Role::Lead => {
                    let guard = FlightGuard {
                        cache: self,
                        entity_id,
                        published: false,
                    };
                    let result = fetch().await;
                    guard.publish(result.clone());
                    return result;
                }
            }
        }
    }
}

/// Clears the in-flight marker even when the leading future is cancelled
/// mid-fetch, so waiters can take over instead of hanging on a dead leader.
struct FlightGuard<'a> {
    cache: &'a SeriesCache,
    entity_id: &'a str,
    published: bool,
}

impl FlightGuard<'_> {
    fn publish(mut self, result: FetchResult) {
        let tx = {
            let mut inner = self.cache.lock();
            let tx = inner.in_flight.remove(self.entity_id);
            if let Ok(series) = &result {
                inner.resident.put(
                    self.entity_id.to_string(),
                    Resident {
                        series: series.clone(),
                        fetched_at: Instant::now(),
                    },
                );
            }
            tx
        };
        self.published = true;
        if let Some(tx) = tx {
            // No receivers is fine: nobody was waiting.
            let _ = tx.send(result);
        }
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if self.published {
            return;
        }
        let mut inner = self.cache.lock();
        inner.in_flight.remove(self.entity_id);
    }
}
