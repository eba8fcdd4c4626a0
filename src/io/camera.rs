//! Camera capability - exclusive video capture access
//!
//! The real device camera belongs to the host runtime; this module defines
//! the capability surface the session consumes plus a simulated device for
//! local runs and tests.

use crate::domain::types::Frame;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no camera device available")]
    NoDevice,
    #[error("camera stream failed: {0}")]
    Stream(String),
}

/// Exclusive video capture capability.
///
/// `acquire` hands out the device's single stream; acquisition may fail
/// with a permission or availability error. The stream releases the device
/// when dropped, so release-exactly-once is ownership rather than
/// bookkeeping.
#[async_trait]
pub trait Camera: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn CameraStream>, CameraError>;
}

/// Live capture stream producing frames on demand.
#[async_trait]
pub trait CameraStream: Send {
    async fn capture_frame(&mut self) -> Result<Frame, CameraError>;
}

/// Camera that synthesizes blank frames at a fixed geometry.
///
/// Used by the demo harness, where a scripted decoder decides when a code
/// "appears" in front of the lens.
pub struct SimulatedCamera {
    width: u32,
    height: u32,
}

impl SimulatedCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[async_trait]
impl Camera for SimulatedCamera {
    async fn acquire(&self) -> Result<Box<dyn CameraStream>, CameraError> {
        Ok(Box::new(SimulatedStream { width: self.width, height: self.height }))
    }
}

struct SimulatedStream {
    width: u32,
    height: u32,
}

#[async_trait]
impl CameraStream for SimulatedStream {
    async fn capture_frame(&mut self) -> Result<Frame, CameraError> {
        Ok(Frame::blank(self.width, self.height))
    }
}
