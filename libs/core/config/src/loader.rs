//! Generic configuration loader.
//!
//! One ingestion path for differently-shaped configuration: any
//! `DeserializeOwned` schema can be read from a YAML file or string. Missing
//! keys fall back to the schema's `#[serde(default)]` values.
//!
//! ```ignore
//! use core_config::load_from_file;
//!
//! let config: AppConfig = load_from_file("config/local.yaml")?;
//! ```

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::ConfigError;

/// Load a configuration schema from a YAML file.
///
/// # Errors
///
/// - [`ConfigError::NotFound`] when the file does not exist
/// - [`ConfigError::Io`] when it cannot be read
/// - [`ConfigError::Invalid`] when its content does not match the schema
pub fn load_from_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&content, &path.display().to_string())
}

/// Load a configuration schema from YAML text.
pub fn load_from_str<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    parse(content, "<inline>")
}

fn parse<T: DeserializeOwned>(content: &str, origin: &str) -> Result<T, ConfigError> {
    serde_yaml_ng::from_str(content).map_err(|e| ConfigError::Invalid {
        origin: origin.to_string(),
        details: e.to_string(),
    })
}
