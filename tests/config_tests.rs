// Integration tests for layered configuration
//
// Environment variables are process-wide, so each test here reads or sets
// a different key.

use anyhow::Result;
use std::fs;
use tempfile::TempDir;
use voice_relay::config::Config;

#[test]
fn test_defaults_without_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("does-not-exist");

    let cfg = Config::load(missing.to_str().unwrap())?;

    assert_eq!(cfg.service.http.port, 3001);
    assert_eq!(cfg.service.http.static_dir, "frontend/dist");
    assert_eq!(cfg.relay.transcription_timeout_secs, 60);
    assert_eq!(cfg.relay.max_recording_bytes, 50 * 1024 * 1024);
    assert_eq!(cfg.transcription.language, "pt");
    assert_eq!(cfg.transcription.health_retries, 3);
    assert_eq!(cfg.translation.models[0], "gemini-2.0-flash");
    cfg.validate()?;

    Ok(())
}

#[test]
fn test_file_overrides_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("relay.toml");
    fs::write(
        &path,
        r#"
[service.http]
port = 8080

[relay]
max_recording_bytes = 1024

[transcription]
base_url = "http://stt.internal:9000"
health_check = false
"#,
    )?;

    let cfg = Config::load(path.to_str().unwrap())?;

    assert_eq!(cfg.service.http.port, 8080);
    assert_eq!(cfg.bind_address(), "0.0.0.0:8080");
    assert_eq!(cfg.relay.max_recording_bytes, 1024);
    assert_eq!(cfg.relay.transcription_timeout_secs, 60);
    assert_eq!(cfg.transcription.base_url, "http://stt.internal:9000");
    assert!(!cfg.transcription.health_check);

    Ok(())
}

#[test]
fn test_environment_overrides() -> Result<()> {
    std::env::set_var("VOICE_RELAY_TRANSCRIPTION__TASK", "translate");

    let temp_dir = TempDir::new()?;
    let cfg = Config::load(temp_dir.path().join("none").to_str().unwrap())?;

    std::env::remove_var("VOICE_RELAY_TRANSCRIPTION__TASK");
    assert_eq!(cfg.transcription.task, "translate");

    Ok(())
}

#[test]
fn test_validate_rejects_bad_values() {
    let mut cfg = Config::default();
    cfg.relay.max_recording_bytes = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.transcription.base_url = "  ".to_string();
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.relay.transcription_timeout_secs = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.service.http.port = 0;
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("service.http.port"));

    let mut cfg = Config::default();
    cfg.transcription.timeout_secs = 0;
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("transcription.timeout_secs"));
}
