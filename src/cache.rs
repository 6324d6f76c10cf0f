//! Time-bounded memoization of expensive, argument-less producers.
//!
//! Entries are keyed by an explicit producer identifier. Producer arguments are
//! never part of the key: caching a producer whose result depends on its inputs
//! returns the value computed for whichever input ran first. Callers that need
//! per-argument caching must fold the argument into the key themselves.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::attendance::Dataset;
use crate::persistence::{PersistenceResult, load_dataset_from_csv};

/// Validity period applied when none is configured.
pub const DEFAULT_VALIDITY: Duration = Duration::from_secs(600);

#[derive(Debug)]
struct CacheEntry<V> {
    value: Arc<V>,
    computed_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, now: Instant, validity: Duration) -> bool {
        now.saturating_duration_since(self.computed_at) < validity
    }
}

/// One entry per key, replaced wholesale once it is older than the validity
/// period.
///
/// The whole check/recompute/store sequence runs under a single lock, so at
/// most one producer executes at a time and callers arriving during a
/// recomputation wait for its result instead of starting their own.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    validity: Duration,
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new(validity: Duration) -> Self {
        Self {
            validity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Returns the stored value for `key` if it was computed less than the
    /// validity period before `now`, otherwise runs `producer` and stores its
    /// result stamped with `now`.
    ///
    /// A failing producer leaves any previous entry in place and the error is
    /// returned to the caller.
    pub fn get_or_compute<F, E>(&self, key: K, now: Instant, producer: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get(&key) {
            if entry.is_fresh(now, self.validity) {
                return Ok(Arc::clone(&entry.value));
            }
        }

        let value = Arc::new(producer()?);
        entries.insert(
            key,
            CacheEntry {
                value: Arc::clone(&value),
                computed_at: now,
            },
        );
        Ok(value)
    }

    /// Time at which the entry for `key` was last computed.
    pub fn computed_at(&self, key: &K) -> Option<Instant> {
        self.entries.lock().get(key).map(|entry| entry.computed_at)
    }

    pub fn is_fresh(&self, key: &K, now: Instant) -> bool {
        self.entries
            .lock()
            .get(key)
            .is_some_and(|entry| entry.is_fresh(now, self.validity))
    }
}

/// Producer identifier under which the parsed attendance source is stored.
pub const DATASET_KEY: &str = "attendance_dataset";

/// Cached access to the parsed attendance source.
///
/// Built once by whatever composes the engine and shared by reference; the
/// source file is reparsed in full whenever the cached copy has gone stale.
#[derive(Debug)]
pub struct DatasetCache {
    source: PathBuf,
    cache: TtlCache<&'static str, Dataset>,
}

impl DatasetCache {
    pub fn new(source: impl Into<PathBuf>, validity: Duration) -> Self {
        Self {
            source: source.into(),
            cache: TtlCache::new(validity),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn validity(&self) -> Duration {
        self.cache.validity()
    }

    pub fn dataset(&self) -> PersistenceResult<Arc<Dataset>> {
        self.dataset_at(Instant::now())
    }

    pub fn dataset_at(&self, now: Instant) -> PersistenceResult<Arc<Dataset>> {
        self.cache.get_or_compute(DATASET_KEY, now, || {
            tracing::info!(source = %self.source.display(), "reloading attendance data");
            load_dataset_from_csv(&self.source)
        })
    }

    pub fn is_fresh(&self, now: Instant) -> bool {
        self.cache.is_fresh(&DATASET_KEY, now)
    }
}
