use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

/// A concurrent map whose entries expire a fixed time after insertion.
///
/// Used for derived values (role lookups) where several back-to-back reads
/// should hit the store once. Expiry is independent of [`invalidate`].
///
/// [`invalidate`]: TimedCache::invalidate
#[derive(Debug)]
pub struct TimedCache<K: Eq + Hash, V> {
    ttl: Duration,
    entries: DashMap<K, (Instant, V)>,
    invalidations: AtomicU64,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
            invalidations: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the live entry for `key`, dropping it if it has expired.
    pub fn get(&self, key: &K) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            let (inserted, value) = entry.value();
            if inserted.elapsed() < self.ttl {
                return Some(value.clone());
            }
        }

        // A concurrent insert may have replaced it; re-check under the lock.
        if self
            .entries
            .remove_if(key, |_, (inserted, _)| inserted.elapsed() >= self.ttl)
            .is_some()
        {
            debug!("Timed cache entry for {:?} expired", key);
        }
        None
    }

    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(key, (Instant::now(), value));
    }

    /// Token to pass to [`insert_if_current`] after loading a value.
    ///
    /// [`insert_if_current`]: TimedCache::insert_if_current
    pub fn generation(&self) -> u64 {
        self.invalidations.load(Ordering::SeqCst)
    }

    /// Inserts `value` unless an invalidation happened since `generation`
    /// was taken. Returns whether the value was cached.
    pub fn insert_if_current(&self, key: K, generation: u64, value: V) -> bool {
        let slot = self.entries.entry(key);
        if self.invalidations.load(Ordering::SeqCst) != generation {
            return false;
        }
        slot.insert((Instant::now(), value));
        true
    }

    pub fn invalidate(&self, key: &K) {
        let slot = self.entries.entry(key.clone());
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        if let Entry::Occupied(entry) = slot {
            entry.remove();
        }
    }

    pub fn clear(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        self.entries.clear();
    }
}
