//! Periodic clock status feed for the host panel
//!
//! Pushes the current time and within-window flag to the host once a second
//! so the panel can show readiness before any scan starts. Independent of
//! session state; stopping the feed never touches the session.

use crate::domain::types::Status;
use crate::domain::window::TimeWindow;
use crate::io::clock::Clock;
use crate::io::host::HostApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

const TICK: Duration = Duration::from_secs(1);

/// Owned handle to the feed task; aborts on drop.
pub struct StatusTicker {
    handle: JoinHandle<()>,
}

impl StatusTicker {
    pub fn spawn(window: TimeWindow, clock: Arc<dyn Clock>, host: Arc<dyn HostApi>) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK);
            loop {
                ticker.tick().await;
                let now = clock.now();
                host.show_status(&Status::Clock {
                    now,
                    within_window: window.contains(now),
                    window,
                });
            }
        });
        Self { handle }
    }

    pub fn stop(self) {
        debug!("status_ticker_stopped");
        // Drop aborts the task
    }
}

impl Drop for StatusTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use parking_lot::Mutex;

    struct FixedClock(NaiveTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveTime {
            self.0
        }
    }

    #[derive(Default)]
    struct CollectingHost {
        statuses: Mutex<Vec<Status>>,
    }

    impl HostApi for CollectingHost {
        fn complete(&self) {}

        fn show_status(&self, status: &Status) {
            self.statuses.lock().push(status.clone());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_reports_clock_status() {
        let window = TimeWindow::default();
        let clock = Arc::new(FixedClock(NaiveTime::from_hms_opt(6, 0, 0).unwrap()));
        let host = Arc::new(CollectingHost::default());

        let ticker = StatusTicker::spawn(window, clock, host.clone());
        tokio::time::sleep(Duration::from_secs(3)).await;
        ticker.stop();

        let statuses = host.statuses.lock();
        assert!(statuses.len() >= 3);
        assert!(statuses
            .iter()
            .all(|s| matches!(s, Status::Clock { within_window: true, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_flags_outside_window() {
        let window = TimeWindow::default();
        let clock = Arc::new(FixedClock(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
        let host = Arc::new(CollectingHost::default());

        let ticker = StatusTicker::spawn(window, clock, host.clone());
        tokio::time::sleep(Duration::from_secs(2)).await;
        drop(ticker);

        assert!(host
            .statuses
            .lock()
            .iter()
            .all(|s| matches!(s, Status::Clock { within_window: false, .. })));
    }
}
