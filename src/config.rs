//! Cache Configuration Module
//!
//! Configuration for [`LfuCache`](crate::LfuCache). The config struct has
//! public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//!
//! # Sizing
//!
//! `capacity` is the maximum number of entries. Each entry costs the key,
//! the value and roughly 48 bytes of list and index bookkeeping. A capacity
//! of `0` is valid and produces a cache that stores nothing: every lookup
//! misses and every insert is ignored.
//!
//! # Examples
//!
//! ```
//! use lfu_cache::config::LfuCacheConfig;
//! use lfu_cache::LfuCache;
//!
//! let config = LfuCacheConfig { capacity: 100 };
//! let cache: LfuCache<u64, i32> = LfuCache::init(config, None);
//! assert_eq!(cache.cap(), 100);
//! ```

use core::fmt;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// LFU tracks the frequency of access for each item and evicts
/// the least frequently used items when the cache reaches capacity.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    /// Zero disables the cache.
    pub capacity: usize,
}

impl LfuCacheConfig {
    /// Returns `true` when this configuration disables caching altogether.
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.capacity == 0
    }
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_config_creation() {
        let config = LfuCacheConfig { capacity: 100 };
        assert_eq!(config.capacity, 100);
        assert!(!config.is_disabled());
    }

    #[test]
    fn test_lfu_config_zero_capacity_is_disabled() {
        let config = LfuCacheConfig { capacity: 0 };
        assert!(config.is_disabled());
    }
}
