//! Least Frequently Used Cache Implementation.
//!
//! The LFU (Least Frequently Used) cache evicts the least frequently accessed
//! entry when a new key arrives and the cache is full. Ties between entries
//! that share the lowest frequency are broken by age: the entry that has gone
//! longest without being inserted or touched is evicted first.
//!
//! # How It Works
//!
//! ```text
//!   map: key ──▶ (frequency, node)
//!
//!   frequency_lists (BTreeMap, ascending):
//!
//!     1 ──▶ [ d ] ◀─ oldest ... newest
//!     2 ──▶ [ c, a ]
//!     5 ──▶ [ b ]
//!           ▲
//!           └── eviction candidate is the front of the lowest bucket
//! ```
//!
//! Every touch (`get`, `touch`, or `put` on a resident key) unlinks the node
//! from bucket `f` and appends it to bucket `f + 1`. A bucket is dropped from
//! the index as soon as its last node leaves, so the index only ever holds
//! frequencies that have members. The lowest frequency is cached in
//! `min_frequency` and only advances when the bucket it points at empties.
//!
//! # Capacity Zero
//!
//! A cache built with capacity `0` is disabled: `get` always misses and
//! `put` is a no-op.

extern crate alloc;

use crate::config::LfuCacheConfig;
use crate::list::{Entry, List};
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on the key map slots reserved at construction. Larger caches
/// grow the map as keys arrive.
const MAX_PREALLOCATED_ENTRIES: usize = 1024;

/// Frequency and list node stored for every resident key.
type FrequencyMetadata<K, V> = (u64, *mut Entry<(K, V)>);

/// An independent copy of every resident key and its current frequency.
///
/// Returned by [`LfuCache::snapshot_frequencies`]. Later cache operations do
/// not affect a snapshot that has already been taken.
pub type FrequencySnapshot<K> = HashMap<K, u64, DefaultHashBuilder>;

/// An implementation of a Least Frequently Used (LFU) cache.
///
/// The cache tracks how often each key is accessed and evicts the least
/// frequently used key when the cache reaches capacity. In case of a tie,
/// the key that was inserted or touched longest ago is evicted.
///
/// `get` and `put` run in O(1) amortized time. Moving a key between
/// frequency buckets costs one `BTreeMap` lookup, which is O(log B) where B
/// is the number of distinct frequencies present (at most the capacity).
///
/// # Examples
///
/// ```
/// use lfu_cache::LfuCache;
///
/// let mut cache = LfuCache::new(3);
///
/// cache.put(1, 10);
/// cache.put(2, 20);
/// cache.put(3, 30);
///
/// assert_eq!(cache.get(&1), Some(&10));
/// assert_eq!(cache.get(&2), Some(&20));
///
/// // Key 3 has the lowest frequency and is evicted
/// assert_eq!(cache.put(4, 40), Some((3, 30)));
/// assert_eq!(cache.get(&3), None);
/// ```
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    /// Configuration for the LFU cache
    config: LfuCacheConfig,

    /// Lowest frequency with at least one member. Only meaningful when the
    /// cache is not empty.
    min_frequency: u64,

    /// Map from keys to their frequency and list node
    map: HashMap<K, FrequencyMetadata<K, V>, S>,

    /// Map from frequency to the keys at that frequency, oldest first
    frequency_lists: BTreeMap<u64, List<(K, V)>>,

    /// Metrics for tracking cache performance and frequency distribution
    metrics: LfuCacheMetrics,
}

// SAFETY: LfuCache owns all data and raw pointers point only to nodes owned by
// `frequency_lists`. Moving the cache to another thread moves every node with it.
unsafe impl<K: Send, V: Send, S: Send> Send for LfuCache<K, V, S> {}

// SAFETY: All mutation requires &mut self; shared references only read.
unsafe impl<K: Sync, V: Sync, S: Sync> Sync for LfuCache<K, V, S> {}

impl<K: Hash + Eq, V> LfuCache<K, V> {
    /// Creates a new LFU cache that holds at most `capacity` entries.
    ///
    /// A capacity of `0` creates a disabled cache.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_cache::LfuCache;
    ///
    /// let cache: LfuCache<i64, i64> = LfuCache::new(10);
    /// assert_eq!(cache.cap(), 10);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> LfuCache<K, V, DefaultHashBuilder> {
        LfuCache::with_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuCache<K, V, S> {
    /// Creates a cache from a configuration and an optional hash builder.
    ///
    /// When `hasher` is `None` the default hash builder for `S` is used.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_cache::config::LfuCacheConfig;
    /// use lfu_cache::LfuCache;
    ///
    /// let config = LfuCacheConfig { capacity: 2 };
    /// let mut cache: LfuCache<&str, u32> = LfuCache::init(config, None);
    /// cache.put("a", 1);
    /// assert!(cache.contains(&"a"));
    /// ```
    pub fn init(config: LfuCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::with_hasher(config.capacity, hasher.unwrap_or_default())
    }

    /// Creates a new LFU cache with the specified capacity and hash builder.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        let config = LfuCacheConfig { capacity };
        #[cfg(feature = "tracing")]
        if config.is_disabled() {
            tracing::debug!("lfu cache created with capacity 0; all operations are no-ops");
        }

        LfuCache {
            config,
            min_frequency: 1,
            map: HashMap::with_capacity_and_hasher(
                capacity.min(MAX_PREALLOCATED_ENTRIES),
                hash_builder,
            ),
            frequency_lists: BTreeMap::new(),
            metrics: LfuCacheMetrics::new(),
        }
    }

    /// Returns the maximum number of key-value pairs the cache can hold.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity
    }

    /// Returns the current number of key-value pairs in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache contains no key-value pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `true` if inserting a new key would evict another one.
    ///
    /// A disabled (capacity `0`) cache is always full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.map.len() >= self.config.capacity
    }

    /// Returns `true` if the key is resident. Does not affect its frequency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the current frequency of a resident key.
    #[inline]
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(|&(frequency, _)| frequency)
    }

    /// Returns the lowest frequency among resident keys, or `None` if empty.
    #[inline]
    pub fn min_frequency(&self) -> Option<u64> {
        if self.is_empty() {
            None
        } else {
            Some(self.min_frequency)
        }
    }

    /// Returns a reference to the metrics for this cache.
    #[inline]
    pub fn metrics(&self) -> &LfuCacheMetrics {
        &self.metrics
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the cache's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type.
    ///
    /// A hit raises the key's frequency by one and makes it the newest
    /// member of its new frequency bucket. The value is never modified.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(node) = self.bump_key(key) else {
            self.metrics.core.record_miss();
            return None;
        };
        self.metrics.core.record_hit();

        // SAFETY: bump_key returns a node that is still linked into a bucket
        unsafe { Some(&(*node).get_value().1) }
    }

    /// Returns a reference to the value without touching its frequency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let &(_, node) = self.map.get(key)?;
        // SAFETY: nodes referenced by the map are linked into a bucket
        unsafe { Some(&(*node).get_value().1) }
    }

    /// Raises the frequency of a resident key without reading its value.
    ///
    /// Returns `false` if the key is not resident.
    pub fn touch<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.bump_key(key).is_some()
    }

    /// Inserts a key-value pair into the cache.
    ///
    /// If the key is already resident its value is overwritten and its
    /// frequency is raised by one, exactly like a `get`. Otherwise the key is
    /// inserted with frequency 1 as the newest member of bucket 1, evicting
    /// the least frequently used entry first when the cache is full.
    ///
    /// Returns the evicted entry, if any. On a disabled cache this is a no-op
    /// that returns `None`.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if self.config.is_disabled() {
            return None;
        }

        if let Some(node) = self.bump_key(&key) {
            // SAFETY: bump_key returns a node that is still linked into a bucket
            unsafe { (*node).get_value_mut().1 = value };
            self.metrics.core.record_update();
            return None;
        }

        let evicted = if self.is_full() {
            self.remove_lfu().map(|(_frequency, evicted)| {
                self.metrics.core.record_eviction();
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    frequency = _frequency,
                    len = self.map.len(),
                    "evicted least frequently used entry"
                );
                evicted
            })
        } else {
            None
        };

        self.min_frequency = 1;
        let node = self
            .frequency_lists
            .entry(1)
            .or_default()
            .push_back((key.clone(), value));
        self.map.insert(key, (1, node));

        self.metrics.core.record_insertion();
        self.metrics.update_frequency_levels(&self.frequency_lists);

        evicted
    }

    /// Removes a key from the cache, returning its value if it was resident.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (frequency, node) = self.map.remove(key)?;
        let list = self.frequency_lists.get_mut(&frequency)?;

        // SAFETY: the map pointed at this node, so it is linked into `list`
        let entry = unsafe { list.remove(node) }?;
        if list.is_empty() {
            self.drop_bucket(frequency);
        }

        self.metrics.core.record_removal();
        self.metrics.update_frequency_levels(&self.frequency_lists);

        // SAFETY: list.remove never hands out a sentinel
        let (_, value) = unsafe { entry.into_value() };
        Some(value)
    }

    /// Returns the entry that the next eviction would remove, without
    /// touching it.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        if self.is_empty() {
            return None;
        }
        self.frequency_lists
            .get(&self.min_frequency)?
            .front()
            .map(|(key, value)| (key, value))
    }

    /// Removes and returns the eviction candidate.
    ///
    /// This is the entry with the lowest frequency; among entries sharing
    /// that frequency it is the one inserted or touched longest ago.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_cache::LfuCache;
    ///
    /// let mut cache = LfuCache::new(2);
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// cache.get(&"a");
    ///
    /// assert_eq!(cache.pop(), Some(("b", 2)));
    /// ```
    pub fn pop(&mut self) -> Option<(K, V)> {
        let (_, popped) = self.remove_lfu()?;
        self.metrics.core.record_removal();
        Some(popped)
    }

    /// Clears the cache, removing all key-value pairs.
    pub fn clear(&mut self) {
        self.map.clear();
        self.frequency_lists.clear();
        self.min_frequency = 1;
        self.metrics.update_frequency_levels(&self.frequency_lists);
    }

    /// Returns a copy of every resident key and its current frequency.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_cache::LfuCache;
    ///
    /// let mut cache = LfuCache::new(2);
    /// cache.put(7, "seven");
    /// let before = cache.snapshot_frequencies();
    ///
    /// cache.get(&7);
    /// assert_eq!(before[&7], 1);
    /// assert_eq!(cache.snapshot_frequencies()[&7], 2);
    /// ```
    pub fn snapshot_frequencies(&self) -> FrequencySnapshot<K>
    where
        K: Clone,
    {
        self.map
            .iter()
            .map(|(key, &(frequency, _))| (key.clone(), frequency))
            .collect()
    }

    /// Returns the frequency buckets from the highest frequency to the lowest.
    ///
    /// Keys inside each bucket are listed oldest first, so the first key of
    /// the last bucket is the next eviction candidate.
    pub fn frequency_table(&self) -> Vec<(u64, Vec<K>)>
    where
        K: Clone,
    {
        self.frequency_lists
            .iter()
            .rev()
            .map(|(&frequency, list)| {
                let keys = list.iter().map(|(key, _)| key.clone()).collect();
                (frequency, keys)
            })
            .collect()
    }

    /// Moves a resident key from bucket `f` to the back of bucket `f + 1`.
    ///
    /// Returns the key's node, which keeps its address across buckets.
    fn bump_key<Q>(&mut self, key: &Q) -> Option<*mut Entry<(K, V)>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let meta = self.map.get_mut(key)?;
        let (frequency, node) = *meta;
        let new_frequency = frequency + 1;
        meta.0 = new_frequency;

        let list = self.frequency_lists.get_mut(&frequency)?;
        // SAFETY: the map pointed at this node, so it is linked into `list`
        let entry = unsafe { list.remove(node) }?;
        if list.is_empty() {
            self.frequency_lists.remove(&frequency);
            if frequency == self.min_frequency {
                self.min_frequency = new_frequency;
            }
        }

        let node = self
            .frequency_lists
            .entry(new_frequency)
            .or_default()
            .push_back_entry(entry);

        self.metrics.record_frequency_increment(new_frequency);
        self.metrics.update_frequency_levels(&self.frequency_lists);

        Some(node)
    }

    /// Unlinks the oldest entry of the lowest frequency bucket.
    ///
    /// Returns the entry together with the frequency it had.
    fn remove_lfu(&mut self) -> Option<(u64, (K, V))> {
        let min_frequency = self.min_frequency;
        let list = self.frequency_lists.get_mut(&min_frequency)?;
        let entry = list.pop_front()?;
        let emptied = list.is_empty();

        // SAFETY: pop_front never hands out a sentinel
        let (key, value) = unsafe { entry.into_value() };
        self.map.remove(&key);
        if emptied {
            self.drop_bucket(min_frequency);
        }
        self.metrics.update_frequency_levels(&self.frequency_lists);

        Some((min_frequency, (key, value)))
    }

    /// Deletes an empty bucket and moves the cached minimum forward if needed.
    fn drop_bucket(&mut self, frequency: u64) {
        self.frequency_lists.remove(&frequency);
        if frequency == self.min_frequency {
            self.min_frequency = self
                .frequency_lists
                .range(frequency..)
                .next()
                .map(|(&next, _)| next)
                .unwrap_or(1);
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

// Implement Debug manually since the map holds raw pointers
impl<K, V, S> fmt::Debug for LfuCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .field("min_frequency", &self.min_frequency)
            .field("buckets", &self.frequency_lists.len())
            .finish()
    }
}
