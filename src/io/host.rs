//! Host plugin surface
//!
//! The habit-tracking host provides the completion API; the session calls
//! `complete()` exactly once per accepted scan. Status events replace any
//! rendered markup - what the host does with them is its own business.

use crate::domain::types::Status;
use tracing::{info, warn};

pub trait HostApi: Send + Sync {
    /// Signal the host that the habit is done.
    fn complete(&self);

    /// Surface a status event to the user.
    fn show_status(&self, status: &Status);
}

/// Host stand-in that renders status events as structured log lines.
pub struct LogHost;

impl HostApi for LogHost {
    fn complete(&self) {
        info!("host_complete");
    }

    fn show_status(&self, status: &Status) {
        match serde_json::to_string(status) {
            Ok(json) => info!(status = %json, "host_status"),
            Err(e) => warn!(error = %e, "host_status_serialize_failed"),
        }
    }
}
