//! Translation lookup metrics.
//!
//! Counts how message lookups were resolved: directly in the requested
//! locale, through the fallback locale, or not at all (the key itself is
//! returned). Each catalog owns its own counters.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lookup counters for one translation catalog.
#[derive(Debug, Default)]
pub struct LookupMetrics {
    /// Lookups answered by the requested locale
    hits: AtomicUsize,

    /// Lookups answered by the fallback locale
    fallbacks: AtomicUsize,

    /// Lookups no locale could answer
    misses: AtomicUsize,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let fallbacks = self.fallbacks();
        let misses = self.misses();
        let total = hits + fallbacks + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            hits,
            fallbacks,
            misses,
            total,
            hit_rate,
        }
    }
}

/// Snapshot of lookup statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub hits: usize,
    pub fallbacks: usize,
    pub misses: usize,
    pub total: usize,

    /// Share of lookups answered by the requested locale, as a percentage (0-100)
    pub hit_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = LookupMetrics::new();
        assert_eq!(metrics.hits(), 0);
        assert_eq!(metrics.fallbacks(), 0);
        assert_eq!(metrics.misses(), 0);
    }

    #[test]
    fn test_record_each_outcome() {
        let metrics = LookupMetrics::new();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_fallback();
        metrics.record_miss();

        assert_eq!(metrics.hits(), 2);
        assert_eq!(metrics.fallbacks(), 1);
        assert_eq!(metrics.misses(), 1);
    }

    #[test]
    fn test_report_empty() {
        let report = LookupMetrics::new().report();
        assert_eq!(report.total, 0);
        assert_eq!(report.hit_rate, 0.0);
    }

    #[test]
    fn test_report_hit_rate() {
        let metrics = LookupMetrics::new();
        // 3 hits, 1 fallback = 75%
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_fallback();

        let report = metrics.report();
        assert_eq!(report.total, 4);
        assert_eq!(report.hit_rate, 75.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = LookupMetrics::new();
        metrics.record_miss();

        let json = serde_json::to_value(metrics.report()).unwrap();
        assert_eq!(json["misses"], 1);
        assert_eq!(json["hit_rate"], 0.0);
    }
}
