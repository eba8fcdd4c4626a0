//! IO modules - external capabilities consumed by the scan session
//!
//! This module contains the collaborator surfaces and their local
//! implementations:
//! - `camera` - exclusive video capture (traits + simulated device)
//! - `decoder` - frame-to-payload decoding (rqrr adapter + scripted double)
//! - `clock` - local wall-clock time
//! - `host` - completion and status surface of the habit-tracking host

pub mod camera;
pub mod clock;
pub mod decoder;
pub mod host;

pub use camera::{Camera, CameraError, CameraStream, SimulatedCamera};
pub use clock::{Clock, SystemClock};
pub use decoder::{Decoder, QrDecoder, ScriptedDecoder};
pub use host::{HostApi, LogHost};
