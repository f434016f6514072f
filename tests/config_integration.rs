//! Integration tests for loading config files from disk.

use std::io::Write;

use tidbits::config::{Config, ConfigError};
use tidbits::imageutils::ResampleMethod;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
[reader]
prompt = "Hit it:"
exclusive = true

[resample]
method = "lanczos"

[embed]
scale = 0.5
format = "jpeg"
nearest = true
"#,
    );

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.reader.prompt, "Hit it:");
    assert!(config.reader.exclusive);
    assert_eq!(config.resample.method().unwrap(), ResampleMethod::Lanczos);
    assert_eq!(config.embed.scale, 0.5);
    assert_eq!(config.embed.format, "jpeg");
    assert!(config.embed.nearest);
}

#[test]
fn test_load_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_explicit_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = Config::load_explicit(&path).unwrap_err();
    assert!(matches!(err, ConfigError::IoError { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_load_malformed_file_is_parse_error() {
    let file = write_config("[reader\nprompt = ");
    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().starts_with("Failed to parse config file"));
}

#[test]
fn test_unknown_method_surfaces_when_used() {
    let file = write_config("[resample]\nmethod = \"sinc\"\n");
    let config = Config::load(Some(file.path())).unwrap();
    assert!(config.resample.method().is_err());
}
