// src/cache.rs
use std::sync::RwLock;
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

pub const LEADS_KEY: &str = "fetchLeads";
pub const JOBS_KEY: &str = "fetchJobs";
pub const ARTICLES_KEY: &str = "fetchArticles";

const DEFAULT_CAPACITY: u64 = 1_000;

pub fn article_key(slug: &str) -> String {
    format!("article:{slug}")
}

/// Read-through cache for query results, keyed by resource name.
///
/// Every invalidation bumps `epoch`. A fetch records the epoch before it runs
/// and only stores its result if the epoch is unchanged, so a read that raced
/// a write never repopulates stale rows.
pub struct QueryCache<V> {
    entries: Cache<String, V>,
    epoch: RwLock<u64>,
}

impl<V: Clone + Send + Sync + 'static> QueryCache<V> {
    /// Entries never go stale on their own; only invalidation or capacity
    /// pressure removes them.
    pub fn new() -> Self {
        Self::bounded(DEFAULT_CAPACITY, None)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::bounded(DEFAULT_CAPACITY, Some(ttl))
    }

    pub fn bounded(capacity: u64, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::<String, V>::builder().max_capacity(capacity);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            entries: builder.build(),
            epoch: RwLock::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key)
    }

    fn epoch(&self) -> u64 {
        self.epoch.read().map(|e| *e).unwrap_or(0)
    }

    fn store(&self, key: &str, started: u64, value: V) {
        // Held across the insert so an invalidation cannot slip in between.
        let Ok(current) = self.epoch.read() else {
            return;
        };
        if *current != started {
            debug!(key, "skipping cache store after invalidation");
            return;
        }
        self.entries.insert(key.to_string(), value);
    }

    /// Serve `key` from cache, or run `fetch` and cache a successful result.
    /// Errors are returned as is and never cached.
    pub fn get_or_fetch<E, F>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let started = self.epoch();
        let value = fetch()?;
        self.store(key, started, value.clone());
        Ok(value)
    }

    /// Like `get_or_fetch` for lookups that may find nothing. Misses are not
    /// stored, so unknown keys leave nothing behind.
    pub fn get_or_fetch_some<E, F>(&self, key: &str, fetch: F) -> Result<Option<V>, E>
    where
        F: FnOnce() -> Result<Option<V>, E>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(Some(hit));
        }
        let started = self.epoch();
        let value = fetch()?;
        if let Some(found) = &value {
            self.store(key, started, found.clone());
        }
        Ok(value)
    }

    pub fn invalidate(&self, key: &str) {
        if let Ok(mut epoch) = self.epoch.write() {
            *epoch += 1;
            self.entries.invalidate(key);
            debug!(key, "cache invalidated");
        }
    }

    pub fn invalidate_prefix(&self, prefix: &str) {
        if let Ok(mut epoch) = self.epoch.write() {
            *epoch += 1;
            let keys: Vec<_> = self
                .entries
                .iter()
                .filter(|(k, _)| k.starts_with(prefix))
                .map(|(k, _)| k)
                .collect();
            for key in keys {
                self.entries.invalidate(key.as_str());
            }
            debug!(prefix, "cache prefix invalidated");
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

impl<V: Clone + Send + Sync + 'static> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
