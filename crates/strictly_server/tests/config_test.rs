//! Tests for server configuration loading.

use std::io::Write;
use strictly_server::ServerConfig;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Temp file");
    file.write_all(content.as_bytes()).expect("Write config");
    file
}

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert_eq!(config.base_url(), "http://127.0.0.1:3000");
    assert!(config.seed().is_none());
}

#[test]
fn test_load_partial_file_fills_defaults() {
    let file = write_config("port = 8080\nseed = 42\n");
    let config = ServerConfig::from_file(file.path()).expect("Config loads");
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 8080);
    assert_eq!(*config.seed(), Some(42));
    assert_eq!(config.base_url(), "http://127.0.0.1:8080");
}

#[test]
fn test_public_url_overrides_bind_address() {
    let file = write_config("host = \"0.0.0.0\"\npublic_url = \"https://farkle.example.com/\"\n");
    let config = ServerConfig::from_file(file.path()).expect("Config loads");
    assert_eq!(config.base_url(), "https://farkle.example.com");
}

#[test]
fn test_overrides() {
    let config = ServerConfig::default()
        .with_host("0.0.0.0".to_string())
        .with_port(9000)
        .with_seed(5);
    assert_eq!(config.base_url(), "http://0.0.0.0:9000");
    assert_eq!(*config.seed(), Some(5));
}

#[test]
fn test_invalid_file_reports_error() {
    let file = write_config("port = \"not a number\"\n");
    let err = ServerConfig::from_file(file.path()).expect_err("Parse fails");
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_reports_error() {
    let err = ServerConfig::from_file("/nonexistent/strictly_farkle.toml").expect_err("Read fails");
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_seeded_factory_is_reproducible() {
    let config = ServerConfig::default().with_seed(11);
    let mut first = config.roller_factory();
    let mut second = config.roller_factory();

    let mut a = first();
    let mut b = second();
    for _ in 0..5 {
        assert_eq!(a.roll(), b.roll());
    }
}
