#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Eviction Order
//!
//! ```text
//!   lowest frequency first ──▶ then oldest touch first
//!
//!   freq 1: [ 9, 4 ]     ◀── 9 is evicted next
//!   freq 2: [ 3 ]
//!   freq 7: [ 1, 8 ]
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation              | Cost        |
//! |------------------------|-------------|
//! | `get` / `touch`        | O(log B)    |
//! | `put`                  | O(log B)    |
//! | `contains` / `peek`    | O(1)        |
//! | `remove` / `pop`       | O(log B)    |
//! | `snapshot_frequencies` | O(n)        |
//!
//! B is the number of distinct frequencies present, which never exceeds the
//! capacity and is usually a handful.
//!
//! ## Basic Usage
//!
//! ```rust
//! use lfu_cache::LfuCache;
//!
//! let mut cache = LfuCache::new(3);
//! cache.put(1, 10);
//! cache.put(2, 20);
//! cache.put(3, 30);
//!
//! assert_eq!(cache.get(&1), Some(&10));
//! assert_eq!(cache.get(&2), Some(&20));
//!
//! // 3 is the only key still at frequency 1
//! assert_eq!(cache.put(4, 40), Some((3, 30)));
//! assert!(!cache.contains(&3));
//! ```
//!
//! ## Thread Safety
//!
//! `LfuCache` has no internal locking. Share it across threads by wrapping
//! the whole cache in a single lock:
//!
//! ```rust
//! use lfu_cache::LfuCache;
//! use std::sync::{Arc, Mutex};
//!
//! let cache = Arc::new(Mutex::new(LfuCache::new(100)));
//! cache.lock().unwrap().put("page", 1);
//! ```
//!
//! ## Metrics
//!
//! ```rust
//! use lfu_cache::metrics::CacheMetrics;
//! use lfu_cache::LfuCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("a", 1);
//! cache.get(&"a");
//! cache.get(&"b");
//!
//! let report = CacheMetrics::metrics(&cache);
//! assert_eq!(report["cache_hits"], 1.0);
//! assert_eq!(report["cache_misses"], 1.0);
//! ```
//!
//! ## Modules
//!
//! - [`lfu`]: Least Frequently Used cache implementation
//! - [`config`]: Configuration structure for the cache
//! - [`metrics`]: Metrics collection for cache performance monitoring

#![no_std]

#[cfg(not(any(feature = "hashbrown", feature = "std")))]
compile_error!("either the `hashbrown` or the `std` feature must be enabled");

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Doubly linked list implementation with in-place editing capabilities.
///
/// **Note**: This module is internal infrastructure. It exposes unsafe raw
/// pointer operations that require careful invariant maintenance.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Least Frequently Used (LFU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least frequently used items
/// when capacity is reached, oldest first among equal frequencies.
pub mod lfu;

/// Cache metrics system.
///
/// Counters for hits, misses and evictions plus the shape of the frequency
/// index, reported through the [`CacheMetrics`](metrics::CacheMetrics) trait.
pub mod metrics;

pub use config::LfuCacheConfig;
pub use lfu::{FrequencySnapshot, LfuCache};
pub use metrics::CacheMetrics;
