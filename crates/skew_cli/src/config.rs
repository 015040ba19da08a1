//! Optional `skew.toml` configuration.
//!
//! Keeps tool-wide defaults (currently the extraction output directory)
//! out of the code: values are loaded here and injected at the command
//! boundary, with CLI flags taking precedence.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "skew.toml";

/// Fallback output directory when neither flag nor config provide one.
pub const DEFAULT_OUTPUT_DIR: &str = "extracted_data";

/// Errors that can occur when loading a `skew.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Top-level `skew.toml` contents.
#[derive(Debug, Default, Deserialize)]
pub struct SkewConfig {
    /// Settings for `skew extract`.
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// The `[extract]` section.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractConfig {
    /// Directory extracted databases are written to.
    pub output_dir: Option<String>,
}

/// Loads and parses a configuration file.
pub fn load_config(path: &Path) -> Result<SkewConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses configuration from a string; useful for tests.
pub fn load_config_from_str(content: &str) -> Result<SkewConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Resolves the effective configuration for a command.
///
/// An explicit `--config` path must exist and parse; without one, a
/// `skew.toml` in the working directory is used when present, and the
/// defaults otherwise.
pub fn resolve_config(explicit: Option<&str>) -> Result<SkewConfig, ConfigError> {
    match explicit {
        Some(path) => load_config(Path::new(path)),
        None => {
            let default = Path::new(CONFIG_FILE);
            if default.is_file() {
                load_config(default)
            } else {
                Ok(SkewConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_output_dir() {
        let config = load_config_from_str(
            r#"
[extract]
output_dir = "corners/out"
"#,
        )
        .unwrap();
        assert_eq!(config.extract.output_dir.as_deref(), Some("corners/out"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert!(config.extract.output_dir.is_none());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let err = load_config_from_str("[extract\noutput_dir = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        assert!(resolve_config(Some("/definitely/not/here.toml")).is_err());
    }

    #[test]
    fn load_config_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("skew.toml");
        std::fs::write(&path, "[extract]\noutput_dir = \"x\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.extract.output_dir.as_deref(), Some("x"));
    }
}
