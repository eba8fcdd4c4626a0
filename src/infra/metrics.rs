//! Lock-free metrics collection and periodic reporting
//!
//! Counter updates use Relaxed atomics; these are statistical counters
//! only. Do NOT use them for coordination or logic decisions.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Lock-free counters for scan activity.
#[derive(Default)]
pub struct Metrics {
    sessions_started: AtomicU64,
    camera_failures: AtomicU64,
    frames_polled: AtomicU64,
    decode_hits: AtomicU64,
    completions: AtomicU64,
    rejections: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_session_started(&self) {
        self.sessions_started.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_camera_failure(&self) {
        self.camera_failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_frame_polled(&self) {
        self.frames_polled.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_decode_hit(&self) {
        self.decode_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_completion(&self) {
        self.completions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_rejection(&self) {
        self.rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Consistent-enough snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sessions_started: self.sessions_started.load(Ordering::Relaxed),
            camera_failures: self.camera_failures.load(Ordering::Relaxed),
            frames_polled: self.frames_polled.load(Ordering::Relaxed),
            decode_hits: self.decode_hits.load(Ordering::Relaxed),
            completions: self.completions.load(Ordering::Relaxed),
            rejections: self.rejections.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time counter values, serializable for egress or logging.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub sessions_started: u64,
    pub camera_failures: u64,
    pub frames_polled: u64,
    pub decode_hits: u64,
    pub completions: u64,
    pub rejections: u64,
}

impl MetricsSnapshot {
    pub fn log(&self) {
        info!(
            sessions_started = %self.sessions_started,
            camera_failures = %self.camera_failures,
            frames_polled = %self.frames_polled,
            decode_hits = %self.decode_hits,
            completions = %self.completions,
            rejections = %self.rejections,
            "metrics_summary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = Metrics::new();
        metrics.record_session_started();
        metrics.record_frame_polled();
        metrics.record_frame_polled();
        metrics.record_decode_hit();
        metrics.record_completion();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.sessions_started, 1);
        assert_eq!(snapshot.frames_polled, 2);
        assert_eq!(snapshot.decode_hits, 1);
        assert_eq!(snapshot.completions, 1);
        assert_eq!(snapshot.camera_failures, 0);
        assert_eq!(snapshot.rejections, 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let metrics = Metrics::new();
        metrics.record_rejection();
        let json = serde_json::to_string(&metrics.snapshot()).unwrap();
        assert!(json.contains("\"rejections\":1"));
    }
}
