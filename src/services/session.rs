//! Scan session lifecycle - the core state machine
//!
//! A session owns the camera stream and the polling loop. `start()` acquires
//! the camera and spawns the poller; each tick captures one frame and asks
//! the decoder for a payload. The first payload claims the session under the
//! state lock, releases the camera, and runs the time gate. `stop()` takes
//! the same lock, so a payload and a stop can never both take effect.

use crate::domain::types::{ScanOutcome, SessionState, Status};
use crate::domain::window::TimeWindow;
use crate::infra::config::Config;
use crate::infra::metrics::Metrics;
use crate::io::camera::{Camera, CameraError, CameraStream};
use crate::io::clock::Clock;
use crate::io::decoder::Decoder;
use crate::io::host::HostApi;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("scan already in progress")]
    AlreadyScanning,
    #[error(transparent)]
    Camera(#[from] CameraError),
}

/// Collaborators and tuning shared with the poller task.
struct SessionCore {
    window: TimeWindow,
    poll_interval: Duration,
    complete_delay: Duration,
    decoder: Arc<dyn Decoder>,
    clock: Arc<dyn Clock>,
    host: Arc<dyn HostApi>,
    metrics: Arc<Metrics>,
    outcome_tx: Option<mpsc::Sender<ScanOutcome>>,
}

/// Mutable session state. All transitions happen under this lock.
struct Inner {
    state: SessionState,
    /// Incremented on every start; lets a stale poller recognize it lost.
    generation: u64,
    poller: Option<JoinHandle<()>>,
}

/// One camera-owning scan session: `Idle -> Scanning -> Idle`.
pub struct ScanSession {
    camera: Arc<dyn Camera>,
    core: Arc<SessionCore>,
    inner: Arc<Mutex<Inner>>,
}

impl ScanSession {
    pub fn new(
        config: &Config,
        camera: Arc<dyn Camera>,
        decoder: Arc<dyn Decoder>,
        clock: Arc<dyn Clock>,
        host: Arc<dyn HostApi>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            camera,
            core: Arc::new(SessionCore {
                window: config.window(),
                poll_interval: Duration::from_millis(config.poll_interval_ms()),
                complete_delay: Duration::from_millis(config.complete_delay_ms()),
                decoder,
                clock,
                host,
                metrics,
                outcome_tx: None,
            }),
            inner: Arc::new(Mutex::new(Inner {
                state: SessionState::Idle,
                generation: 0,
                poller: None,
            })),
        }
    }

    /// Also deliver terminal outcomes over a channel, in addition to the
    /// host status surface. Must be called before the first `start()`.
    pub fn with_outcome_sender(mut self, tx: mpsc::Sender<ScanOutcome>) -> Self {
        let core = Arc::get_mut(&mut self.core)
            .expect("with_outcome_sender called after the session was started");
        core.outcome_tx = Some(tx);
        self
    }

    /// Begin scanning. Valid only from `Idle`.
    ///
    /// Acquires the camera before the session counts as `Scanning`; the
    /// state lock is held across acquisition so a racing `start()` can never
    /// open a second stream. On acquisition failure the session stays `Idle`
    /// with no poller scheduled, and the failure is not retried.
    pub async fn start(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().await;
        if inner.state == SessionState::Scanning {
            warn!("scan_start_rejected_already_scanning");
            return Err(SessionError::AlreadyScanning);
        }

        let stream = match self.camera.acquire().await {
            Ok(stream) => stream,
            Err(e) => {
                self.core.metrics.record_camera_failure();
                self.core.host.show_status(&Status::CameraError { reason: e.to_string() });
                emit_outcome(
                    &self.core,
                    ScanOutcome::CameraUnavailable { reason: e.to_string() },
                );
                warn!(error = %e, "camera_acquire_failed");
                return Err(SessionError::Camera(e));
            }
        };

        inner.generation += 1;
        inner.state = SessionState::Scanning;

        let sid = Uuid::now_v7();
        let handle = tokio::spawn(poll_loop(
            stream,
            sid,
            inner.generation,
            Arc::clone(&self.inner),
            Arc::clone(&self.core),
        ));
        inner.poller = Some(handle);

        self.core.metrics.record_session_started();
        self.core.host.show_status(&Status::ScanningStarted);
        info!(
            sid = %sid,
            window = %self.core.window,
            poll_interval_ms = %self.core.poll_interval.as_millis(),
            "scan_session_started"
        );
        Ok(())
    }

    /// Stop scanning. No-op from `Idle`.
    ///
    /// The state flips to `Idle` and the poller handle is taken under the
    /// lock, then the poller is aborted; a payload decoded in a tick that
    /// lost this race is discarded, and aborting the task drops the stream,
    /// releasing the camera.
    pub async fn stop(&self) {
        let handle = {
            let mut inner = self.inner.lock().await;
            if inner.state != SessionState::Scanning {
                debug!("scan_stop_ignored_idle");
                return;
            }
            inner.state = SessionState::Idle;
            inner.poller.take()
        };

        if let Some(handle) = handle {
            handle.abort();
        }
        self.core.host.show_status(&Status::ScanningStopped);
        info!("scan_session_stopped");
    }

    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state
    }

    /// The acceptance window this session gates on.
    pub fn window(&self) -> TimeWindow {
        self.core.window
    }

    #[cfg(test)]
    async fn has_poller(&self) -> bool {
        self.inner.lock().await.poller.is_some()
    }
}

/// Flip `Scanning -> Idle` if this poller still owns the session.
///
/// Returns false when `stop()` (or a newer start) won the race, in which
/// case the caller must discard whatever it decoded.
async fn claim(inner: &Mutex<Inner>, generation: u64) -> bool {
    let mut inner = inner.lock().await;
    if inner.state == SessionState::Scanning && inner.generation == generation {
        inner.state = SessionState::Idle;
        inner.poller = None;
        true
    } else {
        false
    }
}

async fn poll_loop(
    mut stream: Box<dyn CameraStream>,
    sid: Uuid,
    generation: u64,
    inner: Arc<Mutex<Inner>>,
    core: Arc<SessionCore>,
) {
    let mut ticker = tokio::time::interval(core.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let frame = match stream.capture_frame().await {
            Ok(frame) => frame,
            Err(e) => {
                // Stream died mid-session: same taxonomy as an acquisition
                // failure, terminal for this session instance.
                if claim(&inner, generation).await {
                    drop(stream);
                    core.metrics.record_camera_failure();
                    core.host.show_status(&Status::CameraError { reason: e.to_string() });
                    emit_outcome(&core, ScanOutcome::CameraUnavailable { reason: e.to_string() });
                    warn!(sid = %sid, error = %e, "camera_stream_failed");
                }
                return;
            }
        };
        core.metrics.record_frame_polled();

        let Some(payload) = core.decoder.decode(&frame) else {
            continue;
        };
        core.metrics.record_decode_hit();

        // Commit point: from here the payload is this session's result,
        // unless stop() already flipped the state in this tick.
        if !claim(&inner, generation).await {
            debug!(sid = %sid, "decode_discarded_after_stop");
            return;
        }
        drop(stream);

        let now = core.clock.now();
        if core.window.contains(now) {
            core.host.show_status(&Status::ScanAccepted { at: now });
            info!(sid = %sid, at = %now, "scan_accepted");

            // Leave the success banner up briefly before completing,
            // mirroring the panel's display delay.
            tokio::time::sleep(core.complete_delay).await;
            core.host.complete();
            core.metrics.record_completion();
            emit_outcome(&core, ScanOutcome::Completed { payload, at: now });
            info!(sid = %sid, "scan_session_completed");
        } else {
            core.host.show_status(&Status::ScanRejected { at: now, window: core.window });
            core.metrics.record_rejection();
            emit_outcome(
                &core,
                ScanOutcome::RejectedOutsideWindow { at: now, window: core.window },
            );
            info!(sid = %sid, at = %now, window = %core.window, "scan_rejected_outside_window");
        }
        return;
    }
}

fn emit_outcome(core: &SessionCore, outcome: ScanOutcome) {
    if let Some(tx) = &core.outcome_tx {
        if tx.try_send(outcome.clone()).is_err() {
            warn!(outcome = %outcome.as_str(), "outcome_channel_unavailable");
        }
    }
}
