//! Scangate library
//!
//! Time-gated QR scan sessions for a habit-tracking host: a session owns the
//! camera, polls frames through a decoder capability, and reports completion
//! to the host only when the scan lands inside the configured morning window.
//!
//! Exposes modules for integration testing and binary reuse.

pub mod domain;
pub mod infra;
pub mod io;
pub mod services;
