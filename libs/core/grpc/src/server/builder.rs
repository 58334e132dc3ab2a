//! gRPC Server utilities.
//!
//! Provides helpers for building production-ready gRPC servers.

use super::config::ServerConfig;
use tokio::signal;
use tonic::transport::Server;
use tonic_health::ServingStatus;
use tonic_health::server::HealthReporter;
use tracing::{error, info};

/// Helper for creating gRPC servers with health checks.
///
/// # Example
///
/// ```ignore
/// use grpc_server::{GrpcServer, ServerConfig};
/// use rpc::tasks::v1::project_service_server::{ProjectServiceServer, SERVICE_NAME};
///
/// let config = ServerConfig::default();
/// let (health_reporter, health_service) = tonic_health::server::health_reporter();
///
/// GrpcServer::setup_health(&health_reporter, &config, SERVICE_NAME).await;
/// GrpcServer::log_startup(&config, SERVICE_NAME);
///
/// GrpcServer::builder(&config)
///     .add_service(health_service)
///     .add_service(ProjectServiceServer::new(my_service))
///     .serve(config.socket_addr()?)
///     .await?;
/// ```
pub struct GrpcServer;

impl GrpcServer {
    /// A `tonic` server builder with the configured HTTP/2 and TCP tuning:
    /// request timeout, stream limit, keepalive pings, TCP keepalive and
    /// maximum connection age.
    pub fn builder(config: &ServerConfig) -> Server {
        let mut builder = Server::builder()
            .max_concurrent_streams(config.max_concurrent_streams)
            .http2_keepalive_interval(config.keepalive_interval())
            .http2_keepalive_timeout(config.keepalive_timeout())
            .tcp_keepalive(config.tcp_keepalive());

        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(age) = config.max_connection_age() {
            builder = builder.max_connection_age(age);
        }
        builder
    }

    /// Log server startup information.
    pub fn log_startup(config: &ServerConfig, service_name: &str) {
        info!(
            addr = %config.addr_string(),
            service = service_name,
            compression = config.enable_compression,
            max_message_size = config.max_message_size,
            max_concurrent_streams = config.max_concurrent_streams,
            request_timeout_secs = config.request_timeout_secs,
            "gRPC server starting"
        );

        if config.enable_compression {
            info!("Zstd compression enabled for optimal performance");
        }

        if config.health.enabled {
            info!("Health check service enabled (grpc.health.v1.Health)");
        }
    }

    /// Mark a service as serving.
    ///
    /// Marks the service, the optional alias from [`HealthConfig`] and the
    /// empty service name (used by k8s default health checks).
    ///
    /// [`HealthConfig`]: super::HealthConfig
    pub async fn setup_health(
        health_reporter: &HealthReporter,
        config: &ServerConfig,
        service_name: &str,
    ) {
        Self::set_status(health_reporter, config, service_name, ServingStatus::Serving).await;
        info!(service = service_name, "Service marked as serving");
    }

    /// Mark everything [`setup_health`](Self::setup_health) registered as
    /// not serving, so load balancers stop routing during drain.
    pub async fn mark_not_serving(
        health_reporter: &HealthReporter,
        config: &ServerConfig,
        service_name: &str,
    ) {
        Self::set_status(health_reporter, config, service_name, ServingStatus::NotServing).await;
        info!(service = service_name, "Service marked as not serving");
    }

    async fn set_status(
        health_reporter: &HealthReporter,
        config: &ServerConfig,
        service_name: &str,
        status: ServingStatus,
    ) {
        health_reporter.set_service_status(service_name, status).await;

        if let Some(alias) = &config.health.service_name {
            health_reporter.set_service_status(alias.as_str(), status).await;
        }

        health_reporter.set_service_status("", status).await;
    }
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
///
/// A signal handler that cannot be installed is logged and never fires, so
/// the other one still triggers shutdown.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accepts_default_config() {
        let _server = GrpcServer::builder(&ServerConfig::default());
    }

    #[test]
    fn test_builder_with_disabled_knobs() {
        let mut config = ServerConfig::default();
        config.max_connection_age_secs = 0;
        config.request_timeout_secs = 0;
        config.keepalive.interval_secs = 0;
        let _server = GrpcServer::builder(&config);
    }

    #[tokio::test]
    async fn test_health_status_updates_do_not_block() {
        let (reporter, _service) = tonic_health::server::health_reporter();
        let mut config = ServerConfig::default();
        config.health.service_name = Some("ready_to_do".to_string());

        GrpcServer::setup_health(&reporter, &config, "svc").await;
        GrpcServer::mark_not_serving(&reporter, &config, "svc").await;
    }
}
