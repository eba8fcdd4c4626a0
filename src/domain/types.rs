//! Shared types for scan sessions

use crate::domain::window::TimeWindow;
use chrono::NaiveTime;
use serde::Serialize;

/// One captured camera frame, tightly packed RGBA.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 4) as usize);
        Self { width, height, data }
    }

    /// A black frame of the given geometry.
    pub fn blank(width: u32, height: u32) -> Self {
        Self { width, height, data: vec![0; (width * height * 4) as usize] }
    }
}

/// Scan session lifecycle state.
///
/// Exactly one poller task and one camera stream exist iff the session is
/// `Scanning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Scanning,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Scanning => "scanning",
        }
    }
}

/// Terminal result of one scan session.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Payload decoded inside the window; the host completion fires.
    Completed { payload: String, at: NaiveTime },
    /// Payload decoded, but outside the acceptance window.
    RejectedOutsideWindow { at: NaiveTime, window: TimeWindow },
    /// Camera could not be acquired, or the stream died mid-session.
    CameraUnavailable { reason: String },
}

impl ScanOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanOutcome::Completed { .. } => "completed",
            ScanOutcome::RejectedOutsideWindow { .. } => "rejected_outside_window",
            ScanOutcome::CameraUnavailable { .. } => "camera_unavailable",
        }
    }
}

/// User-visible status events, delivered to the host in place of any
/// rendered markup. Errors surface here and nowhere else.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Status {
    /// Periodic clock tick: current time and whether a scan now would pass.
    Clock { now: NaiveTime, within_window: bool, window: TimeWindow },
    ScanningStarted,
    ScanningStopped,
    ScanAccepted { at: NaiveTime },
    ScanRejected { at: NaiveTime, window: TimeWindow },
    CameraError { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_frame_geometry() {
        let frame = Frame::blank(4, 3);
        assert_eq!(frame.data.len(), 4 * 3 * 4);
        assert!(frame.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_outcome_as_str() {
        let outcome = ScanOutcome::CameraUnavailable { reason: "no device".into() };
        assert_eq!(outcome.as_str(), "camera_unavailable");
    }
}
