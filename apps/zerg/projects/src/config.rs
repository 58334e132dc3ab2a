//! Application configuration.
//!
//! Loaded once at startup and passed down by value.

use core_config::{ConfigError, FromEnv, LoggingConfig, load_from_file};
use grpc_server::ServerConfig;
use serde::Deserialize;
use std::path::Path;

/// Root configuration of the projects service
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub grpc: ServerConfig,
    pub logging: LoggingConfig,
}

impl FromEnv for AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            grpc: ServerConfig::from_env()?,
            logging: LoggingConfig::default(),
        })
    }
}

impl AppConfig {
    /// Read the YAML file at `path`, or fall back to defaults with
    /// `GRPC_*` environment overrides when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => load_from_file(path),
            None => Self::from_env(),
        }
    }
}
