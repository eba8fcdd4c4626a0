//! Scangate - time-gated QR scan sessions for a habit-tracking host
//!
//! Demo harness: wires a scan session against a simulated camera and a
//! scripted decoder so the whole lifecycle can be exercised without a host
//! runtime or a device camera.
//!
//! Module structure:
//! - `domain/` - Core types (TimeWindow, Frame, ScanOutcome, Status)
//! - `io/` - External capabilities (camera, decoder, clock, host)
//! - `services/` - Business logic (ScanSession, StatusTicker)
//! - `infra/` - Infrastructure (Config, Metrics)

use clap::Parser;
use scangate::infra::{Config, Metrics};
use scangate::io::{LogHost, ScriptedDecoder, SimulatedCamera, SystemClock};
use scangate::services::{ScanSession, StatusTicker};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Scangate - QR scan panel core, minus the panel
#[derive(Parser, Debug)]
#[command(name = "scangate", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,

    /// Payload the scripted decoder reports once the code is "visible"
    #[arg(long, default_value = "morning-qr")]
    payload: String,

    /// Frames to poll before the scripted code becomes visible
    #[arg(long, default_value = "5")]
    decode_after: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(git_hash = %env!("GIT_HASH"), "scangate starting");

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        window = %config.window(),
        poll_interval_ms = %config.poll_interval_ms(),
        complete_delay_ms = %config.complete_delay_ms(),
        "config_loaded"
    );

    let metrics = Arc::new(Metrics::new());
    let clock = Arc::new(SystemClock);
    let host = Arc::new(LogHost);
    let camera = Arc::new(SimulatedCamera::new(config.frame_width(), config.frame_height()));
    let decoder = Arc::new(ScriptedDecoder::new(args.payload, args.decode_after));

    // Periodic metrics reporter
    let metrics_clone = metrics.clone();
    let metrics_interval = config.metrics_interval_secs();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(metrics_interval));
        loop {
            interval.tick().await;
            metrics_clone.snapshot().log();
        }
    });

    // Clock status feed, the panel's readiness display
    let ticker = StatusTicker::spawn(config.window(), clock.clone(), host.clone());

    let (outcome_tx, mut outcome_rx) = mpsc::channel(8);
    let session = ScanSession::new(&config, camera, decoder, clock, host, metrics.clone())
        .with_outcome_sender(outcome_tx);

    if let Err(e) = session.start().await {
        warn!(error = %e, "scan_start_failed");
        return Err(e.into());
    }

    // Run to the first terminal outcome, or stop on Ctrl+C
    tokio::select! {
        outcome = outcome_rx.recv() => {
            if let Some(outcome) = outcome {
                info!(outcome = %serde_json::to_string(&outcome)?, "session_outcome");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown_signal_received");
            session.stop().await;
        }
    }

    ticker.stop();
    metrics.snapshot().log();
    info!("scangate shutdown complete");
    Ok(())
}
