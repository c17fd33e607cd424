//! epidash-cache
//!
//! The series cache used by the `Dashboard` orchestrator: an explicit,
//! injected cache object with LRU capacity and TTL bounds, plus a
//! single-flight `get_or_fetch` that de-duplicates concurrent requests for
//! the same entity.

mod cache;

pub use crate::cache::SeriesCache;
