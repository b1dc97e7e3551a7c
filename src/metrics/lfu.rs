//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) cache algorithm.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends [`CoreCacheMetrics`]).
///
/// Focuses on the frequency distribution: how many buckets exist and the
/// spread between the coldest and hottest resident key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all caches
    pub core: CoreCacheMetrics,

    /// Lowest frequency currently resident (0 when empty)
    pub min_frequency: u64,

    /// Highest frequency currently resident (0 when empty)
    pub max_frequency: u64,

    /// Total number of frequency increments (hits, touches and overwrites)
    pub total_frequency_increments: u64,

    /// Number of frequency buckets currently in use
    pub active_frequency_levels: u64,
}

impl LfuCacheMetrics {
    /// Creates an empty LFU metrics set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frequency increment of a resident key.
    pub fn record_frequency_increment(&mut self, new_frequency: u64) {
        self.total_frequency_increments += 1;
        if new_frequency > self.max_frequency {
            self.max_frequency = new_frequency;
        }
    }

    /// Refreshes bucket statistics from the frequency index.
    pub fn update_frequency_levels<T>(&mut self, frequency_lists: &BTreeMap<u64, T>) {
        self.active_frequency_levels = frequency_lists.len() as u64;

        match (
            frequency_lists.first_key_value(),
            frequency_lists.last_key_value(),
        ) {
            (Some((&min_freq, _)), Some((&max_freq, _))) => {
                self.min_frequency = min_freq;
                self.max_frequency = max_freq;
            }
            _ => {
                self.min_frequency = 0;
                self.max_frequency = 0;
            }
        }
    }

    /// Average number of increments per hit, or 0.0 if there were no hits.
    pub fn average_frequency(&self) -> f64 {
        if self.core.cache_hits > 0 {
            self.total_frequency_increments as f64 / self.core.cache_hits as f64
        } else {
            0.0
        }
    }

    /// The spread between the hottest and coldest resident key.
    pub fn frequency_range(&self) -> u64 {
        self.max_frequency.saturating_sub(self.min_frequency)
    }

    /// Converts LFU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert("min_frequency".to_string(), self.min_frequency as f64);
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert("frequency_range".to_string(), self.frequency_range() as f64);
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
        metrics.insert(
            "active_frequency_levels".to_string(),
            self.active_frequency_levels as f64,
        );
        metrics.insert("average_frequency".to_string(), self.average_frequency());

        metrics
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_levels_follow_index() {
        let mut metrics = LfuCacheMetrics::new();
        let mut index = BTreeMap::new();
        index.insert(1u64, ());
        index.insert(4u64, ());
        index.insert(9u64, ());

        metrics.update_frequency_levels(&index);
        assert_eq!(metrics.active_frequency_levels, 3);
        assert_eq!(metrics.min_frequency, 1);
        assert_eq!(metrics.max_frequency, 9);
        assert_eq!(metrics.frequency_range(), 8);

        index.clear();
        metrics.update_frequency_levels(&index);
        assert_eq!(metrics.active_frequency_levels, 0);
        assert_eq!(metrics.frequency_range(), 0);
    }

    #[test]
    fn test_average_frequency() {
        let mut metrics = LfuCacheMetrics::new();
        assert_eq!(metrics.average_frequency(), 0.0);

        metrics.core.record_hit();
        metrics.core.record_hit();
        metrics.record_frequency_increment(2);
        metrics.record_frequency_increment(3);
        metrics.record_frequency_increment(4);
        assert_eq!(metrics.average_frequency(), 1.5);
        assert_eq!(metrics.max_frequency, 4);
    }

    #[test]
    fn test_algorithm_name_and_keys() {
        let metrics = LfuCacheMetrics::new();
        assert_eq!(metrics.algorithm_name(), "LFU");
        let map = metrics.metrics();
        assert!(map.contains_key("active_frequency_levels"));
        assert!(map.contains_key("hit_rate"));
    }
}
