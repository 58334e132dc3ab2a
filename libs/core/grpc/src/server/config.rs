//! Server configuration, read from the `grpc` section of a config file or
//! from environment variables.

use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;
use tonic::codec::CompressionEncoding;

use crate::error::{GrpcError, GrpcResult};

const DEFAULT_HOST: &str = "[::1]";
const DEFAULT_PORT: u16 = 50051;

/// HTTP/2 and TCP keepalive settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeepaliveConfig {
    /// HTTP/2 ping interval in seconds (0 disables pings)
    pub interval_secs: u64,
    /// Time to wait for a ping ack before closing the connection
    pub timeout_secs: u64,
    /// TCP keepalive in seconds (0 disables it)
    pub tcp_secs: u64,
}

impl Default for KeepaliveConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            timeout_secs: 20,
            tcp_secs: 60,
        }
    }
}

/// `grpc.health.v1.Health` settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HealthConfig {
    pub enabled: bool,
    /// Extra name reported as serving besides the registered service and "".
    pub service_name: Option<String>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            service_name: None,
        }
    }
}

/// Configuration for gRPC server.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to (default: [::1] for IPv6 localhost)
    pub host: String,
    /// Port to listen on (default: 50051)
    pub port: u16,
    /// Enable Zstd compression (default: true)
    pub enable_compression: bool,
    /// Maximum decoded/encoded message size (default: 4MB)
    pub max_message_size: usize,
    /// Per-connection HTTP/2 stream limit (default: 1000)
    pub max_concurrent_streams: u32,
    /// Server-side deadline applied to every request (default: 30s)
    pub request_timeout_secs: u64,
    /// Connections older than this are closed (default: 30m, 0 disables)
    pub max_connection_age_secs: u64,
    pub keepalive: KeepaliveConfig,
    pub health: HealthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            enable_compression: true,
            max_message_size: 4 * 1024 * 1024, // 4MB
            max_concurrent_streams: 1000,
            request_timeout_secs: 30,
            max_connection_age_secs: 30 * 60,
            keepalive: KeepaliveConfig::default(),
            health: HealthConfig::default(),
        }
    }
}

impl FromEnv for ServerConfig {
    /// Defaults with environment overrides.
    ///
    /// Reads:
    /// - `GRPC_HOST` (default: [::1])
    /// - `GRPC_PORT` (default: 50051)
    /// - `GRPC_COMPRESSION` (default: true)
    /// - `GRPC_MAX_MESSAGE_SIZE` (default: 4194304 / 4MB)
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let enable_compression = env_or_default("GRPC_COMPRESSION", "true");

        Ok(Self {
            host: env_or_default("GRPC_HOST", DEFAULT_HOST),
            port: env_parse_or("GRPC_PORT", DEFAULT_PORT)?,
            enable_compression: enable_compression != "false" && enable_compression != "0",
            max_message_size: env_parse_or("GRPC_MAX_MESSAGE_SIZE", defaults.max_message_size)?,
            ..defaults
        })
    }
}

impl ServerConfig {
    /// Create a new server config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host to bind to.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port to listen on.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enable or disable compression.
    pub fn with_compression(mut self, enable: bool) -> Self {
        self.enable_compression = enable;
        self
    }

    /// Set maximum message size.
    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    /// Get the socket address to bind to.
    pub fn socket_addr(&self) -> GrpcResult<SocketAddr> {
        let addr = self.addr_string();
        addr.parse()
            .map_err(|source| GrpcError::InvalidAddress { addr, source })
    }

    /// Get the address string (for logging).
    pub fn addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Compression codec to negotiate, if enabled.
    pub fn compression(&self) -> Option<CompressionEncoding> {
        self.enable_compression.then_some(CompressionEncoding::Zstd)
    }

    /// Per-request deadline; `0` means none.
    pub fn request_timeout(&self) -> Option<Duration> {
        secs(self.request_timeout_secs)
    }

    pub fn max_connection_age(&self) -> Option<Duration> {
        secs(self.max_connection_age_secs)
    }

    pub fn keepalive_interval(&self) -> Option<Duration> {
        secs(self.keepalive.interval_secs)
    }

    pub fn keepalive_timeout(&self) -> Option<Duration> {
        secs(self.keepalive.timeout_secs)
    }

    pub fn tcp_keepalive(&self) -> Option<Duration> {
        secs(self.keepalive.tcp_secs)
    }
}

fn secs(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value))
}
