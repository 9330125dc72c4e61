//! Request and transition counters, exposed as JSON on `/metrics`.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monitor metrics
#[derive(Default)]
pub struct MonitorMetrics {
    // Request counters
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    pub requests_error: AtomicU64,

    // State transitions
    pub meals_started: AtomicU64,
    pub meals_ended: AtomicU64,
    pub resets: AtomicU64,

    // Latency tracking (simplified - no histograms)
    pub total_latency_ms: AtomicU64,
}

impl MonitorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request
    pub fn record_request(&self, success: bool, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        if success {
            self.requests_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_error.fetch_add(1, Ordering::Relaxed);
        }

        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
    }

    pub fn record_start(&self) {
        self.meals_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_end(&self) {
        self.meals_ended.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reset(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    /// Get average latency in ms
    pub fn average_latency_ms(&self) -> f64 {
        let total = self.total_latency_ms.load(Ordering::Relaxed);
        let count = self.requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "success": self.requests_success.load(Ordering::Relaxed),
                "error": self.requests_error.load(Ordering::Relaxed),
                "avg_latency_ms": self.average_latency_ms(),
            },
            "transitions": {
                "started": self.meals_started.load(Ordering::Relaxed),
                "ended": self.meals_ended.load(Ordering::Relaxed),
                "resets": self.resets.load(Ordering::Relaxed),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_request() {
        let metrics = MonitorMetrics::new();
        metrics.record_request(true, 10);
        metrics.record_request(false, 30);

        assert_eq!(metrics.requests_total.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.requests_success.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.requests_error.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.average_latency_ms(), 20.0);
    }

    #[test]
    fn test_transitions_json() {
        let metrics = MonitorMetrics::new();
        metrics.record_start();
        metrics.record_start();
        metrics.record_end();
        metrics.record_reset();

        let json = metrics.to_json();
        assert_eq!(json["transitions"]["started"], 2);
        assert_eq!(json["transitions"]["ended"], 1);
        assert_eq!(json["transitions"]["resets"], 1);
        assert_eq!(json["requests"]["avg_latency_ms"], 0.0);
    }
}
