//! Domain models - core types for time-gated scanning
//!
//! This module contains the canonical data types used throughout the crate:
//! - `TimeWindow` - acceptance window in minutes since local midnight
//! - `Frame` - one captured camera frame
//! - `ScanOutcome` - terminal result of a scan session
//! - `SessionState` - scan session lifecycle state
//! - `Status` - user-visible status events delivered to the host

pub mod types;
pub mod window;

pub use types::{Frame, ScanOutcome, SessionState, Status};
pub use window::{TimeWindow, WindowError};
