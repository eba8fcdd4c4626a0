//! Configuration loading from TOML files
//!
//! Config file is selected via the --config command line argument; a
//! missing or unparseable file falls back to defaults with a warning.

use crate::domain::window::TimeWindow;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    /// Window start, "HH:MM" local time
    #[serde(default = "default_window_start")]
    pub start: String,
    /// Window end, "HH:MM" local time (exclusive)
    #[serde(default = "default_window_end")]
    pub end: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { start: default_window_start(), end: default_window_end() }
    }
}

fn default_window_start() -> String {
    "05:00".to_string()
}

fn default_window_end() -> String {
    "07:15".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    /// Frame poll interval while scanning
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Delay between an accepted scan and the host completion call
    #[serde(default = "default_complete_delay_ms")]
    pub complete_delay_ms: u64,
    /// Simulated camera frame geometry (demo harness only)
    #[serde(default = "default_frame_width")]
    pub frame_width: u32,
    #[serde(default = "default_frame_height")]
    pub frame_height: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            complete_delay_ms: default_complete_delay_ms(),
            frame_width: default_frame_width(),
            frame_height: default_frame_height(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    300
}

fn default_complete_delay_ms() -> u64 {
    1500
}

fn default_frame_width() -> u32 {
    640
}

fn default_frame_height() -> u32 {
    480
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_interval")]
    pub interval_secs: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { interval_secs: default_metrics_interval() }
    }
}

fn default_metrics_interval() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    window: TimeWindow,
    poll_interval_ms: u64,
    complete_delay_ms: u64,
    frame_width: u32,
    frame_height: u32,
    metrics_interval_secs: u64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: TimeWindow::default(),
            poll_interval_ms: default_poll_interval_ms(),
            complete_delay_ms: default_complete_delay_ms(),
            frame_width: default_frame_width(),
            frame_height: default_frame_height(),
            metrics_interval_secs: default_metrics_interval(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        let window = TimeWindow::parse(&toml_config.window.start, &toml_config.window.end)
            .with_context(|| format!("Invalid [window] in config file {}", path.display()))?;

        Ok(Self {
            window,
            poll_interval_ms: toml_config.scanner.poll_interval_ms,
            complete_delay_ms: toml_config.scanner.complete_delay_ms,
            frame_width: toml_config.scanner.frame_width,
            frame_height: toml_config.scanner.frame_height,
            metrics_interval_secs: toml_config.metrics.interval_secs,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries the TOML file first, falls back to defaults
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {e:#}. Using defaults.");
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms
    }

    pub fn complete_delay_ms(&self) -> u64 {
        self.complete_delay_ms
    }

    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    pub fn metrics_interval_secs(&self) -> u64 {
        self.metrics_interval_secs
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method for tests to set the acceptance window
    #[cfg(test)]
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Builder method for tests to set the poll interval
    #[cfg(test)]
    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }
}
