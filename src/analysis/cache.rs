use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::config::Config;
use crate::types::{RepoData, RepoId};

/// Recently fetched repositories, keyed by identity and expiring after a TTL.
///
/// Lets filter and timeframe changes re-shape data without going back to
/// the network.
pub struct FetchCache {
    entries: LruCache<RepoId, (RepoData, Instant)>,
    ttl: Duration,
}

impl FetchCache {
    /// Create a new cache; a zero capacity is treated as one.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_capacity, config.cache_ttl)
    }

    /// Store freshly fetched data
    pub fn store(&mut self, id: RepoId, data: RepoData) {
        self.store_at(id, data, Instant::now());
    }

    fn store_at(&mut self, id: RepoId, data: RepoData, fetched_at: Instant) {
        self.entries.put(id, (data, fetched_at));
    }

    /// Retrieve data if it is still fresh; stale entries are dropped.
    pub fn get(&mut self, id: &RepoId) -> Option<RepoData> {
        let (data, fetched_at) = self.entries.get(id)?;
        if fetched_at.elapsed() < self.ttl {
            tracing::debug!(repo = %id, "fetch cache hit");
            return Some(data.clone());
        }
        self.entries.pop(id);
        None
    }

    pub fn invalidate(&mut self, id: &RepoId) {
        self.entries.pop(id);
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FetchCache {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RepositorySnapshot;

    fn data(name: &str) -> RepoData {
        RepoData {
            snapshot: RepositorySnapshot {
                name: name.to_string(),
                owner_login: "octo".to_string(),
                description: None,
                stars: 0,
                forks: 0,
                open_issues: 0,
                watchers: 0,
                created_at: "2020-01-01T00:00:00Z".to_string(),
                updated_at: "2020-01-01T00:00:00Z".to_string(),
                language: None,
                license_name: None,
                languages_url: None,
            },
            commits: vec![1, 2, 3],
            contributors: Vec::new(),
            languages: Vec::new(),
            readme: None,
        }
    }

    #[test]
    fn test_hit_while_fresh() {
        let mut cache = FetchCache::new(4, Duration::from_secs(60));
        let id = RepoId::new("octo", "a");
        cache.store(id.clone(), data("a"));
        assert_eq!(cache.get(&id).map(|d| d.snapshot.name), Some("a".to_string()));
        assert!(cache.get(&RepoId::new("octo", "b")).is_none());
    }

    #[test]
    fn test_stale_entries_are_evicted() {
        let mut cache = FetchCache::new(4, Duration::from_millis(10));
        let id = RepoId::new("octo", "a");
        let long_ago = Instant::now()
            .checked_sub(Duration::from_secs(1))
            .unwrap_or_else(Instant::now);
        cache.store_at(id.clone(), data("a"), long_ago);
        std::thread::sleep(Duration::from_millis(15));
        assert!(cache.get(&id).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let mut cache = FetchCache::new(2, Duration::from_secs(60));
        cache.store(RepoId::new("o", "a"), data("a"));
        cache.store(RepoId::new("o", "b"), data("b"));
        cache.store(RepoId::new("o", "c"), data("c"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&RepoId::new("o", "a")).is_none());
        assert!(cache.get(&RepoId::new("o", "c")).is_some());
    }

    #[test]
    fn test_invalidate_and_clear() {
        let mut cache = FetchCache::new(0, Duration::from_secs(60));
        let id = RepoId::new("o", "a");
        cache.store(id.clone(), data("a"));
        cache.invalidate(&id);
        assert!(cache.is_empty());

        cache.store(id, data("a"));
        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
