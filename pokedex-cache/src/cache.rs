//! In-memory response cache with background expiry.
//!
//! Entries are stamped when inserted and removed by a sweeper task that
//! wakes once per sweep interval (the TTL by default). Reads never check
//! freshness, so an entry may be served for up to one sweep interval past
//! its TTL before it is reclaimed.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use pokedex_core::constants::DEFAULT_CACHE_TTL_SECS;
use pokedex_core::error::{PokedexError, Result};

/// Cached response body.
#[derive(Clone)]
struct CacheEntry {
    payload: Bytes,
    created_at: Instant,
}

impl CacheEntry {
    fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }
}

/// Cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live applied to every entry
    pub ttl: Duration,
    /// Sweep period; defaults to `ttl` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep_interval: Option<Duration>,
}

impl CacheConfig {
    /// Creates a config that sweeps once per TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sweep_interval: None,
        }
    }

    /// Sweeps more often than once per TTL, tightening the staleness bound
    /// to `ttl + interval`.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = Some(interval);
        self
    }

    /// Effective period of the background sweep.
    pub fn sweep_period(&self) -> Duration {
        self.sweep_interval.unwrap_or(self.ttl)
    }

    /// Rejects zero durations, which would turn the sweeper into a busy loop.
    pub fn validate(&self) -> Result<()> {
        if self.ttl.is_zero() {
            return Err(PokedexError::InvalidTtl("ttl must be greater than zero".into()));
        }
        if self.sweep_interval.is_some_and(|i| i.is_zero()) {
            return Err(PokedexError::InvalidTtl(
                "sweep interval must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}

#[derive(Default)]
struct Store {
    entries: HashMap<String, CacheEntry>,
    stopped: bool,
}

/// State shared between the cache handle and its sweeper task.
struct Shared {
    store: Mutex<Store>,
    ttl: Duration,
}

impl Shared {
    /// Removes every entry created strictly before `now - ttl`.
    fn purge_expired(&self, now: Instant) -> usize {
        let mut store = self.store.lock();
        let before = store.entries.len();
        store.entries.retain(|_, entry| entry.age(now) <= self.ttl);
        before - store.entries.len()
    }
}

struct Sweeper {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Time-boxed cache of raw response bodies keyed by request URL.
///
/// Thread-safe. Each instance owns exactly one sweeper task, started on
/// construction and stopped by [`ResponseCache::shutdown`]. Dropping the
/// cache without shutting it down also ends the sweeper on its next wake-up.
pub struct ResponseCache {
    shared: Arc<Shared>,
    config: CacheConfig,
    sweeper: Mutex<Option<Sweeper>>,
}

impl ResponseCache {
    /// Creates a cache whose entries live for `ttl`, swept once per `ttl`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(ttl: Duration) -> Result<Self> {
        Self::with_config(CacheConfig::new(ttl))
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| PokedexError::NoRuntime)?;

        let shared = Arc::new(Shared {
            store: Mutex::new(Store::default()),
            ttl: config.ttl,
        });

        let period = config.sweep_period();
        let first_sweep = Instant::now().checked_add(period).ok_or_else(|| {
            PokedexError::InvalidTtl(format!("sweep period {period:?} is out of range"))
        })?;
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = runtime.spawn(run_sweeper(Arc::clone(&shared), first_sweep, period, stop_rx));

        info!(ttl = ?config.ttl, sweep_interval = ?period, "Response cache started");

        Ok(Self {
            shared,
            config,
            sweeper: Mutex::new(Some(Sweeper {
                stop: stop_tx,
                handle,
            })),
        })
    }

    /// Stores `payload` under `key`, resetting the entry's age to zero.
    ///
    /// Ignored once the cache has been shut down.
    pub fn insert(&self, key: impl Into<String>, payload: impl Into<Bytes>) {
        let key = key.into();
        let entry = CacheEntry {
            payload: payload.into(),
            created_at: Instant::now(),
        };

        let mut store = self.shared.store.lock();
        if store.stopped {
            trace!(%key, "Insert after shutdown ignored");
            return;
        }
        store.entries.insert(key, entry);
    }

    /// Gets the cached payload for `key`.
    ///
    /// Returns the entry whenever one is present, even if its TTL has
    /// elapsed and the sweeper has not reached it yet.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.shared
            .store
            .lock()
            .entries
            .get(key)
            .map(|entry| entry.payload.clone())
    }

    /// Runs a sweep immediately and returns the number of removed entries.
    pub fn purge_expired(&self) -> usize {
        self.shared.purge_expired(Instant::now())
    }

    /// Clears every entry and stops the sweeper, waiting for it to exit.
    ///
    /// Fails with [`PokedexError::CacheStopped`] if the cache was already
    /// shut down.
    pub async fn shutdown(&self) -> Result<()> {
        let sweeper = self.sweeper.lock().take().ok_or(PokedexError::CacheStopped)?;

        let cleared = {
            let mut store = self.shared.store.lock();
            store.stopped = true;
            let cleared = store.entries.len();
            store.entries.clear();
            cleared
        };

        // The receiver is gone only if the task already finished.
        let _ = sweeper.stop.send(());
        sweeper
            .handle
            .await
            .map_err(|e| PokedexError::InternalError(format!("cache sweeper failed: {e}")))?;

        info!(cleared, "Response cache stopped");
        Ok(())
    }

    /// Returns true once [`ResponseCache::shutdown`] has run.
    pub fn is_stopped(&self) -> bool {
        self.shared.store.lock().stopped
    }

    /// Returns the number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.shared.store.lock().entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.shared.store.lock().entries.is_empty()
    }

    /// Time-to-live of every entry.
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Period of the background sweep.
    pub fn sweep_interval(&self) -> Duration {
        self.config.sweep_period()
    }

    /// Get current configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let store = self.shared.store.lock();
        let expired = store
            .entries
            .values()
            .filter(|entry| entry.age(now) > self.config.ttl)
            .count();

        CacheStats {
            total_entries: store.entries.len(),
            expired_entries: expired,
            valid_entries: store.entries.len() - expired,
        }
    }
}

impl fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (entries, stopped) = {
            let store = self.shared.store.lock();
            (store.entries.len(), store.stopped)
        };

        f.debug_struct("ResponseCache")
            .field("config", &self.config)
            .field("entries", &entries)
            .field("stopped", &stopped)
            .finish()
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Total entries (including expired ones awaiting the sweep)
    pub total_entries: usize,
    /// Entries older than the TTL
    pub expired_entries: usize,
    /// Entries still within the TTL
    pub valid_entries: usize,
}

async fn run_sweeper(
    shared: Arc<Shared>,
    start: Instant,
    period: Duration,
    mut stop: oneshot::Receiver<()>,
) {
    let mut ticker = time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // Also fires when the sender is dropped with the cache.
            _ = &mut stop => break,
            _ = ticker.tick() => {
                let removed = shared.purge_expired(Instant::now());
                if removed > 0 {
                    debug!(removed, "Swept expired cache entries");
                } else {
                    trace!("Cache sweep found nothing to expire");
                }
            }
        }
    }

    debug!("Cache sweeper exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tokio::time::sleep;

    const TTL: Duration = Duration::from_millis(100);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let err = ResponseCache::new(Duration::ZERO).unwrap_err();
        assert!(matches!(err, PokedexError::InvalidTtl(_)));
    }

    #[tokio::test]
    async fn test_zero_sweep_interval_rejected() {
        let config = CacheConfig::new(TTL).with_sweep_interval(Duration::ZERO);
        let err = ResponseCache::with_config(config).unwrap_err();
        assert!(matches!(err, PokedexError::InvalidTtl(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_ttl_rejected() {
        let err = ResponseCache::new(Duration::from_secs(u64::MAX)).unwrap_err();
        assert!(matches!(err, PokedexError::InvalidTtl(_)));

        let config = CacheConfig::new(TTL).with_sweep_interval(Duration::MAX);
        assert!(matches!(
            ResponseCache::with_config(config),
            Err(PokedexError::InvalidTtl(_))
        ));
    }

    #[test]
    fn test_requires_runtime() {
        let err = ResponseCache::new(TTL).unwrap_err();
        assert!(matches!(err, PokedexError::NoRuntime));
    }

    #[test]
    fn test_config_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(DEFAULT_CACHE_TTL_SECS));
        assert_eq!(config.sweep_period(), config.ttl);
        assert_eq!(CacheConfig::new(TTL).with_sweep_interval(ms(25)).sweep_period(), ms(25));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_insert_get() {
        let cache = ResponseCache::new(TTL).unwrap();
        cache.insert("a", vec![1u8, 2, 3]);

        assert_eq!(cache.get("a").as_deref(), Some(&[1u8, 2, 3][..]));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_miss() {
        let cache = ResponseCache::new(TTL).unwrap();
        assert!(cache.get("nonexistent").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_payload_is_cached() {
        let cache = ResponseCache::new(TTL).unwrap();
        cache.insert("empty", Bytes::new());
        assert_eq!(cache.get("empty"), Some(Bytes::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_scenario() {
        let cache = ResponseCache::new(TTL).unwrap();
        cache.insert("a", vec![1u8, 2, 3]);

        sleep(ms(10)).await;
        assert_eq!(cache.get("a").as_deref(), Some(&[1u8, 2, 3][..]));

        // t = 250ms: two sweep periods have elapsed
        sleep(ms(240)).await;
        assert!(cache.get("a").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_present_for_full_ttl() {
        let cache = ResponseCache::new(TTL).unwrap();
        cache.insert("a", "payload");

        sleep(ms(99)).await;
        assert!(cache.get("a").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_served_until_next_sweep() {
        let cache = ResponseCache::new(TTL).unwrap();
        cache.insert("a", "payload");

        // The tick at 100ms sees an age of exactly one TTL and keeps it
        sleep(ms(150)).await;
        assert!(cache.get("a").is_some());
        assert_eq!(cache.stats().expired_entries, 1);

        sleep(ms(60)).await;
        assert!(cache.get("a").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_age() {
        let cache = ResponseCache::new(TTL).unwrap();
        cache.insert("a", "first");

        sleep(ms(150)).await;
        cache.insert("a", "second");

        // The 200ms tick would have expired the first write
        sleep(ms(60)).await;
        assert_eq!(cache.get("a"), Some(Bytes::from_static(b"second")));

        // The 300ms tick sees an age of 150ms
        sleep(ms(100)).await;
        assert!(cache.get("a").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_expire_independently() {
        let cache = ResponseCache::new(TTL).unwrap();
        cache.insert("old", "1");

        sleep(ms(150)).await;
        cache.insert("new", "2");

        sleep(ms(60)).await;
        assert!(cache.get("old").is_none());
        assert_eq!(cache.get("new"), Some(Bytes::from_static(b"2")));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_does_not_refresh() {
        let cache = ResponseCache::new(TTL).unwrap();
        cache.insert("a", "payload");

        sleep(ms(80)).await;
        assert!(cache.get("a").is_some());

        sleep(ms(40)).await;
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.get("a").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tighter_sweep_interval() {
        let config = CacheConfig::new(TTL).with_sweep_interval(ms(25));
        let cache = ResponseCache::with_config(config).unwrap();
        cache.insert("a", "payload");

        // Swept at the 125ms tick instead of 200ms
        sleep(ms(130)).await;
        assert!(cache.get("a").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_stats() {
        let cache = ResponseCache::new(TTL).unwrap();
        cache.insert("a", "1");
        sleep(ms(150)).await;
        cache.insert("b", "2");

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.expired_entries, 1);
        assert_eq!(stats.valid_entries, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_clears() {
        let cache = ResponseCache::new(TTL).unwrap();
        cache.insert("a", "1");
        cache.insert("b", "2");

        cache.shutdown().await.unwrap();

        assert!(cache.is_stopped());
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_shutdown_errors() {
        let cache = ResponseCache::new(TTL).unwrap();
        cache.shutdown().await.unwrap();

        let err = cache.shutdown().await.unwrap_err();
        assert!(matches!(err, PokedexError::CacheStopped));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_shutdown_succeeds_once() {
        let cache = ResponseCache::new(TTL).unwrap();
        let (a, b) = tokio::join!(cache.shutdown(), cache.shutdown());
        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_insert_after_shutdown_is_inert() {
        let cache = ResponseCache::new(TTL).unwrap();
        cache.shutdown().await.unwrap();

        cache.insert("late", "payload");
        assert!(cache.get("late").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_joins_sweeper() {
        let cache = ResponseCache::new(TTL).unwrap();
        assert_eq!(Arc::strong_count(&cache.shared), 2);

        cache.shutdown().await.unwrap();
        assert_eq!(Arc::strong_count(&cache.shared), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_sweeper() {
        let cache = ResponseCache::new(TTL).unwrap();
        let shared = Arc::downgrade(&cache.shared);

        drop(cache);
        sleep(ms(1)).await;

        assert!(shared.upgrade().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_insert_get() {
        let config = CacheConfig::new(Duration::from_secs(60)).with_sweep_interval(ms(1));
        let cache = Arc::new(ResponseCache::with_config(config).unwrap());

        let workers = (0..8).map(|worker| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                for i in 0..250u32 {
                    let key = format!("https://pokeapi.co/api/v2/pokemon/{worker}-{i}/");
                    cache.insert(key.clone(), i.to_be_bytes().to_vec());
                    assert!(cache.get(&key).is_some());
                    if i % 50 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            })
        });

        for result in futures::future::join_all(workers).await {
            result.unwrap();
        }

        assert_eq!(cache.len(), 8 * 250);
        for worker in 0..8 {
            for i in 0..250u32 {
                let key = format!("https://pokeapi.co/api/v2/pokemon/{worker}-{i}/");
                assert_eq!(cache.get(&key).as_deref(), Some(&i.to_be_bytes()[..]));
            }
        }

        cache.shutdown().await.unwrap();
    }

    proptest! {
        #[test]
        fn prop_insert_then_get_returns_payload(
            entries in prop::collection::hash_map(
                "[a-z0-9/?=&]{1,24}",
                prop::collection::vec(any::<u8>(), 0..32),
                1..20,
            ),
            replacement in prop::collection::vec(any::<u8>(), 0..32),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let _guard = runtime.enter();
            let cache = ResponseCache::new(Duration::from_secs(60)).unwrap();

            for (key, payload) in &entries {
                cache.insert(key.clone(), payload.clone());
            }
            for (key, payload) in &entries {
                prop_assert_eq!(cache.get(key), Some(Bytes::from(payload.clone())));
            }

            // Overwriting one key leaves every other key untouched
            let (victim, _) = entries.iter().next().unwrap();
            cache.insert(victim.clone(), replacement.clone());
            prop_assert_eq!(cache.get(victim), Some(Bytes::from(replacement.clone())));
            for (key, payload) in entries.iter().filter(|(k, _)| *k != victim) {
                prop_assert_eq!(cache.get(key), Some(Bytes::from(payload.clone())));
            }
            prop_assert_eq!(cache.len(), entries.len());
        }
    }
}
