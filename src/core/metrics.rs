//! Pool metrics for observability
//!
//! Worker-side failures never propagate back to producers, so these counters
//! are the only way to observe evictions, sink misses, and rejected writes.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters tracking worker pool activity.
///
/// # Example
///
/// ```
/// use logpool::PoolMetrics;
///
/// let metrics = PoolMetrics::new();
/// metrics.record_posted();
/// metrics.record_processed();
/// assert_eq!(metrics.posted(), 1);
/// assert_eq!(metrics.processed(), 1);
/// ```
#[derive(Debug)]
pub struct PoolMetrics {
    /// Tasks accepted into the queue (records and flushes)
    posted: AtomicU64,
    /// Tasks popped and run to completion by a worker
    processed: AtomicU64,
    /// Tasks evicted from a full queue to admit newer ones
    evicted: AtomicU64,
    /// File-sink lookups that missed because the logger unregistered
    sink_misses: AtomicU64,
}

impl PoolMetrics {
    pub const fn new() -> Self {
        Self {
            posted: AtomicU64::new(0),
            processed: AtomicU64::new(0),
            evicted: AtomicU64::new(0),
            sink_misses: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn posted(&self) -> u64 {
        self.posted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn evicted(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_misses(&self) -> u64 {
        self.sink_misses.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_posted(&self) -> u64 {
        self.posted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_processed(&self) -> u64 {
        self.processed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_evicted(&self) -> u64 {
        self.evicted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_miss(&self) -> u64 {
        self.sink_misses.fetch_add(1, Ordering::Relaxed)
    }

    /// Eviction rate as a percentage of posted tasks (0.0 - 100.0)
    pub fn eviction_rate(&self) -> f64 {
        let posted = self.posted() as f64;
        if posted == 0.0 {
            0.0
        } else {
            (self.evicted() as f64 / posted) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.posted.store(0, Ordering::Relaxed);
        self.processed.store(0, Ordering::Relaxed);
        self.evicted.store(0, Ordering::Relaxed);
        self.sink_misses.store(0, Ordering::Relaxed);
    }
}

impl Default for PoolMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PoolMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            posted: AtomicU64::new(self.posted()),
            processed: AtomicU64::new(self.processed()),
            evicted: AtomicU64::new(self.evicted()),
            sink_misses: AtomicU64::new(self.sink_misses()),
        }
    }
}
