//! Configuration file handling for tidbits.
//!
//! Loads configuration from `<config dir>/tidbits/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::imageutils::ResampleMethod;

/// Configuration file structure for tidbits.
/// Loaded from <config dir>/tidbits/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub resample: ResampleConfig,
    #[serde(default)]
    pub embed: EmbedConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ReaderConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Serialize reads of the same terminal within this process
    #[serde(default)]
    pub exclusive: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            exclusive: false,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ResampleConfig {
    #[serde(default = "default_method")]
    pub method: String,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
        }
    }
}

impl ResampleConfig {
    pub fn method(&self) -> Result<ResampleMethod, crate::imageutils::ImageError> {
        self.method.parse()
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct EmbedConfig {
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub nearest: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            format: default_format(),
            nearest: false,
        }
    }
}

fn default_prompt() -> String {
    "Press a key...".to_string()
}

fn default_method() -> String {
    ResampleMethod::default().name().to_string()
}

fn default_scale() -> f64 {
    1.0
}

fn default_format() -> String {
    "png".to_string()
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            Self::load_explicit(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a path the user named explicitly.
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_explicit(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

/// Contents written by `tidbits config init`.
pub const DEFAULT_CONFIG: &str = r#"# tidbits configuration

[reader]
# Text shown before waiting for a key
prompt = "Press a key..."
# Serialize reads of the same terminal within one process
exclusive = false

[resample]
# Method: nearest, bilinear, bicubic, lanczos
method = "bicubic"

[embed]
# Display scale relative to pixel size (0.5 suits HiDPI screens)
scale = 1.0
# Container format: png, jpeg, bmp, gif, ...
format = "png"
# Render scaled pixels as crisp blocks
nearest = false
"#;

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("tidbits").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/tidbits/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.reader.prompt, "Press a key...");
        assert!(!config.reader.exclusive);
        assert_eq!(config.resample.method().unwrap(), ResampleMethod::Bicubic);
        assert_eq!(config.embed.scale, 1.0);
        assert_eq!(config.embed.format, "png");
        assert!(!config.embed.nearest);
    }

    #[test]
    fn test_default_config_text_matches_defaults() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let parsed: Config = toml::from_str("[embed]\nnearest = true\n").unwrap();
        assert!(parsed.embed.nearest);
        assert_eq!(parsed.embed.scale, 1.0);
        assert_eq!(parsed.reader, ReaderConfig::default());
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = default_path();
        assert!(path.ends_with("tidbits/config.toml"));
    }
}
