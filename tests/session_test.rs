//! Integration test for the public scan-session surface
//!
//! Runs a full session against the shipped simulated camera and scripted
//! decoder, checking the exactly-once completion contract from outside the
//! crate.

use chrono::NaiveTime;
use scangate::domain::{ScanOutcome, SessionState, Status};
use scangate::infra::{Config, Metrics};
use scangate::io::{Clock, HostApi, ScriptedDecoder, SimulatedCamera};
use scangate::services::ScanSession;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

struct FixedClock(NaiveTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

#[derive(Default)]
struct CountingHost {
    completions: AtomicU64,
}

impl HostApi for CountingHost {
    fn complete(&self) {
        self.completions.fetch_add(1, Ordering::Relaxed);
    }

    fn show_status(&self, _status: &Status) {}
}

#[tokio::test(start_paused = true)]
async fn test_simulated_scan_completes_at_window_start() {
    let config = Config::default();
    let host = Arc::new(CountingHost::default());
    let metrics = Arc::new(Metrics::new());
    let (outcome_tx, mut outcome_rx) = mpsc::channel(4);

    // 05:00 exactly: the inclusive start of the default window
    let session = ScanSession::new(
        &config,
        Arc::new(SimulatedCamera::new(64, 64)),
        Arc::new(ScriptedDecoder::new("habit-token", 3)),
        Arc::new(FixedClock(NaiveTime::from_hms_opt(5, 0, 0).unwrap())),
        host.clone(),
        metrics.clone(),
    )
    .with_outcome_sender(outcome_tx);

    session.start().await.unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    let outcome = outcome_rx.try_recv().unwrap();
    assert!(matches!(outcome, ScanOutcome::Completed { ref payload, .. } if payload == "habit-token"));
    assert_eq!(host.completions.load(Ordering::Relaxed), 1);
    assert_eq!(session.state().await, SessionState::Idle);

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.sessions_started, 1);
    assert_eq!(snapshot.completions, 1);
    assert_eq!(snapshot.decode_hits, 1);
    assert!(snapshot.frames_polled >= 4);
}
