use crate::key::{CacheKey, KeySizeMap};

/// Last observed height per stable item key.
///
/// Entries are keyed by identity, never by position, so reordering the data set keeps every
/// measurement attached to its item. Nothing is evicted for the lifetime of the owning engine.
#[derive(Clone)]
pub struct MeasurementCache<K> {
    sizes: KeySizeMap<K>,
}

impl<K: CacheKey> MeasurementCache<K> {
    pub fn new() -> Self {
        Self {
            sizes: KeySizeMap::<K>::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<u32> {
        self.sizes.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.sizes.contains_key(key)
    }

    /// Inserts or overwrites the height for `key`.
    ///
    /// Returns `false` when the cache already held exactly `height` for `key`, so callers can
    /// skip a recompute pass for repeated identical reports.
    pub fn record(&mut self, key: K, height: u32) -> bool {
        match self.sizes.insert(key, height) {
            Some(prev) => prev != height,
            None => true,
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<u32> {
        self.sizes.remove(key)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn clear(&mut self) {
        self.sizes.clear();
    }

    /// Iterates over the cached measurements (key → height) without allocations.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u32)> + '_ {
        self.sizes.iter().map(|(k, v)| (k, *v))
    }
}

impl<K: CacheKey> Default for MeasurementCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> core::fmt::Debug for MeasurementCache<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MeasurementCache")
            .field("len", &self.sizes.len())
            .finish()
    }
}
