//! Integration tests for configuration loading

use scangate::infra::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let config_content = r#"
[window]
start = "06:30"
end = "09:00"

[scanner]
poll_interval_ms = 100
complete_delay_ms = 500
frame_width = 320
frame_height = 240

[metrics]
interval_secs = 15
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.window().to_string(), "06:30-09:00");
    assert_eq!(config.poll_interval_ms(), 100);
    assert_eq!(config.complete_delay_ms(), 500);
    assert_eq!(config.frame_width(), 320);
    assert_eq!(config.frame_height(), 240);
    assert_eq!(config.metrics_interval_secs(), 15);
}

#[test]
fn test_partial_config_fills_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[window]\nstart = \"06:00\"\n").unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.window().to_string(), "06:00-07:15");
    assert_eq!(config.poll_interval_ms(), 300);
    assert_eq!(config.complete_delay_ms(), 1500);
}

#[test]
fn test_load_from_path_fallback() {
    let config = Config::load_from_path("/nonexistent/config.toml");
    assert_eq!(config.window().to_string(), "05:00-07:15");
    assert_eq!(config.poll_interval_ms(), 300);
}

#[test]
fn test_inverted_window_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[window]\nstart = \"23:00\"\nend = \"01:00\"\n").unwrap();
    temp_file.flush().unwrap();

    assert!(Config::from_file(temp_file.path()).is_err());
}
