//! Generic stale-while-revalidate cache with request coalescing.
//!
//! One [`Cache`] instance holds the entries for a single resource shape
//! (e.g. the aluno list, or alunos by id), keyed by a typed key.  Each
//! store owns its cache instances explicitly; there is no ambient global
//! state, and tests build a fresh cache per case.
//!
//! Read semantics per entry:
//!
//! - **fresh** snapshot: returned synchronously, no network call;
//! - **stale** snapshot: returned immediately while one background
//!   revalidation runs;
//! - **no** snapshot: the caller awaits the fetch, and concurrent callers
//!   for the same key coalesce onto the single in-flight request.
//!
//! A failed fetch never discards previously cached data.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::Instant;

use evotrack_client::config::ClientConfig;
use evotrack_client::error::ApiError;

/// Result of a cached read.  Errors are shared because a single failed
/// fetch may be observed by several coalesced callers.
pub type FetchResult<T> = Result<Arc<T>, Arc<ApiError>>;

/// Unit key for caches that hold a single unparameterized collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ListKey;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Per-read behavior knobs.
#[derive(Debug, Clone, Copy)]
pub struct CacheOptions {
    /// How long a snapshot is served without revalidation.
    pub fresh_for: Duration,
    /// How many times a failed fetch is retried (transport errors only).
    pub retries: u32,
    /// When false the read is skipped entirely, used to defer fetching
    /// until a dependent value is known.
    pub enabled: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            fresh_for: Duration::from_secs(30),
            retries: 2,
            enabled: true,
        }
    }
}

impl CacheOptions {
    /// Options derived from the client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            fresh_for: Duration::from_secs(config.fresh_for_secs),
            retries: config.retry_count,
            enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

struct Entry<T> {
    data: Option<Arc<T>>,
    /// `None` marks the entry stale (never fetched, or invalidated).
    fetched_at: Option<Instant>,
    /// Present while a fetch for this key is in flight; waiters subscribe
    /// to it instead of issuing their own request.
    inflight: Option<broadcast::Sender<FetchResult<T>>>,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            data: None,
            fetched_at: None,
            inflight: None,
        }
    }
}

impl<T> Entry<T> {
    fn is_fresh(&self, fresh_for: Duration) -> bool {
        self.fetched_at
            .map(|at| at.elapsed() < fresh_for)
            .unwrap_or(false)
    }
}

/// A captured entry state, used to roll an entry back to exactly what it
/// was before an optimistic mutation.
pub struct Snapshot<T> {
    data: Option<Arc<T>>,
    fetched_at: Option<Instant>,
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Shared cache for one resource shape.  Cloning is cheap and clones see
/// the same entries.
pub struct Cache<K, T> {
    entries: Arc<Mutex<HashMap<K, Entry<T>>>>,
}

impl<K, T> Clone for Cache<K, T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, T> Default for Cache<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> Cache<K, T> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

/// What a read decided to do while holding the lock.  Spawning and
/// awaiting happen after the lock is released.
enum Plan<T> {
    Hit(Arc<T>),
    StaleHit(Arc<T>, broadcast::Sender<FetchResult<T>>),
    Join(broadcast::Receiver<FetchResult<T>>),
    Fetch(broadcast::Sender<FetchResult<T>>),
}

impl<K, T> Cache<K, T>
where
    K: Eq + Hash + Clone + Send + 'static,
    T: Send + Sync + 'static,
{
    /// Read through the cache.
    ///
    /// Returns `None` when the read is disabled via
    /// [`CacheOptions::enabled`]; otherwise the snapshot (fresh, stale,
    /// or freshly fetched) or the fetch error.
    pub async fn get_with<F, Fut>(
        &self,
        key: K,
        opts: CacheOptions,
        fetcher: F,
    ) -> Option<FetchResult<T>>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        if !opts.enabled {
            return None;
        }

        let plan = {
            let mut entries = self.entries.lock().expect("cache lock poisoned");
            let entry = entries.entry(key.clone()).or_default();
            match entry.data.clone() {
                Some(data) if entry.is_fresh(opts.fresh_for) => Plan::Hit(data),
                Some(data) => {
                    if entry.inflight.is_some() {
                        // A revalidation is already running; keep serving
                        // the stale snapshot.
                        Plan::Hit(data)
                    } else {
                        let (tx, _) = broadcast::channel(1);
                        entry.inflight = Some(tx.clone());
                        Plan::StaleHit(data, tx)
                    }
                }
                None => match &entry.inflight {
                    Some(tx) => Plan::Join(tx.subscribe()),
                    None => {
                        let (tx, _) = broadcast::channel(1);
                        entry.inflight = Some(tx.clone());
                        Plan::Fetch(tx)
                    }
                },
            }
        };

        let result = match plan {
            Plan::Hit(data) => Ok(data),
            Plan::StaleHit(data, tx) => {
                // Stale-while-revalidate: answer now, refresh in the
                // background.
                let entries = Arc::clone(&self.entries);
                tokio::spawn(async move {
                    run_fetch(entries, key, fetcher, opts.retries, tx).await;
                });
                Ok(data)
            }
            Plan::Join(mut rx) => match rx.recv().await {
                Ok(result) => result,
                Err(_) => Err(Arc::new(ApiError::Internal(
                    "coalesced fetch ended without a result".into(),
                ))),
            },
            Plan::Fetch(tx) => {
                run_fetch(Arc::clone(&self.entries), key, fetcher, opts.retries, tx).await
            }
        };

        Some(result)
    }

    /// Current snapshot for a key, without touching freshness or issuing
    /// a fetch.
    pub fn get(&self, key: &K) -> Option<Arc<T>> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        entries.get(key).and_then(|entry| entry.data.clone())
    }

    /// Store an authoritative value for a key, marking it fresh.
    pub fn insert(&self, key: K, value: T) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        let entry = entries.entry(key).or_default();
        entry.data = Some(Arc::new(value));
        entry.fetched_at = Some(Instant::now());
    }

    /// Edit the cached value in place (optimistic update).  Freshness is
    /// left untouched.  Returns false when the key holds no data.
    pub fn update(&self, key: &K, f: impl FnOnce(&mut T)) -> bool
    where
        T: Clone,
    {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get_mut(key).and_then(|entry| entry.data.as_mut()) {
            Some(data) => {
                f(Arc::make_mut(data));
                true
            }
            None => false,
        }
    }

    /// Mark a key stale without discarding its data, so the next read
    /// revalidates in the background instead of blocking.
    pub fn invalidate(&self, key: &K) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        if let Some(entry) = entries.get_mut(key) {
            entry.fetched_at = None;
        }
    }

    /// Invalidate every key matching the predicate (e.g. all filtered
    /// history listings of one aluno).
    pub fn invalidate_matching(&self, pred: impl Fn(&K) -> bool) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        for (key, entry) in entries.iter_mut() {
            if pred(key) {
                entry.fetched_at = None;
            }
        }
    }

    /// Drop the entry entirely; the next read must fetch.
    pub fn remove(&self, key: &K) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.remove(key);
    }

    /// Capture the entry's current state for later [`restore`](Self::restore).
    pub fn snapshot(&self, key: &K) -> Snapshot<T> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) => Snapshot {
                data: entry.data.clone(),
                fetched_at: entry.fetched_at,
            },
            None => Snapshot {
                data: None,
                fetched_at: None,
            },
        }
    }

    /// Put an entry back to a previously captured state.
    pub fn restore(&self, key: K, snapshot: Snapshot<T>) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        if snapshot.data.is_none() {
            // The key held nothing before the mutation; do not leave an
            // empty shell behind (unless a fetch is in flight for it).
            if let Some(entry) = entries.get_mut(&key) {
                entry.data = None;
                entry.fetched_at = None;
                if entry.inflight.is_none() {
                    entries.remove(&key);
                }
            }
            return;
        }
        let entry = entries.entry(key).or_default();
        entry.data = snapshot.data;
        entry.fetched_at = snapshot.fetched_at;
    }

    /// Keys currently present that match the predicate.
    pub fn keys_matching(&self, pred: impl Fn(&K) -> bool) -> Vec<K> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        entries.keys().filter(|k| pred(k)).cloned().collect()
    }

    /// Whether the key currently holds a fresh snapshot.
    pub fn is_fresh(&self, key: &K, fresh_for: Duration) -> bool {
        let entries = self.entries.lock().expect("cache lock poisoned");
        entries
            .get(key)
            .map(|entry| entry.is_fresh(fresh_for))
            .unwrap_or(false)
    }

    /// Drop every entry, e.g. when the session is torn down.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.clear();
    }
}

/// Collapse a disabled read into an error, for stores whose reads are
/// unconditionally enabled.
pub fn require_enabled<T>(result: Option<FetchResult<T>>) -> FetchResult<T> {
    result.unwrap_or_else(|| Err(Arc::new(ApiError::Internal("cache read is disabled".into()))))
}

// ---------------------------------------------------------------------------
// Fetch driver
// ---------------------------------------------------------------------------

/// Run the fetch (with retries), commit the outcome to the entry, and
/// wake any coalesced waiters.
async fn run_fetch<K, T, F, Fut>(
    entries: Arc<Mutex<HashMap<K, Entry<T>>>>,
    key: K,
    fetcher: F,
    retries: u32,
    tx: broadcast::Sender<FetchResult<T>>,
) -> FetchResult<T>
where
    K: Eq + Hash,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let result = match fetch_with_retries(&fetcher, retries).await {
        Ok(value) => {
            let data = Arc::new(value);
            let mut entries = entries.lock().expect("cache lock poisoned");
            if let Some(entry) = entries.get_mut(&key) {
                entry.data = Some(Arc::clone(&data));
                entry.fetched_at = Some(Instant::now());
                entry.inflight = None;
            }
            Ok(data)
        }
        Err(err) => {
            // Previously cached data stays servable.
            tracing::warn!(error = %err, "Fetch failed, keeping previous snapshot");
            let mut entries = entries.lock().expect("cache lock poisoned");
            if let Some(entry) = entries.get_mut(&key) {
                entry.inflight = None;
            }
            Err(Arc::new(err))
        }
    };

    // No receivers just means nobody coalesced onto this fetch.
    let _ = tx.send(result.clone());
    result
}

async fn fetch_with_retries<F, Fut, T>(fetcher: &F, retries: u32) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match fetcher().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < retries => {
                attempt += 1;
                tracing::warn!(error = %err, attempt, "Retrying failed fetch");
            }
            Err(err) => return Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests (synchronous primitives; read-path behavior is covered in
// tests/cache_tests.rs)
// ---------------------------------------------------------------------------
