//! gRPC server initialization and lifecycle management
//!
//! This module handles server setup:
//! - Repository, domain service and gRPC handler wiring
//! - Compression, message-size limits and request-id interception
//! - Health check service (grpc.health.v1.Health)
//! - Graceful shutdown on SIGINT/SIGTERM

use domain_projects::{InMemoryProjectRepository, ProjectService};
use eyre::{Result, WrapErr};
use grpc_server::{GrpcServer, RequestIdInterceptor, shutdown_signal};
use rpc::tasks::v1::project_service_server::{ProjectServiceServer, SERVICE_NAME};
use std::future::Future;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::service::interceptor::InterceptedService;
use tonic_health::server::health_reporter;
use tracing::info;

use crate::config::AppConfig;
use crate::service::ProjectServiceImpl;

/// Run the gRPC server
///
/// Binds the configured address and serves until SIGINT or SIGTERM.
///
/// # Errors
///
/// Returns an error if:
/// - The configured host/port is not a valid socket address
/// - Server binding fails
/// - Server runtime encounters an error
pub async fn run(config: AppConfig) -> Result<()> {
    let addr = config
        .grpc
        .socket_addr()
        .wrap_err("Failed to parse server address")?;

    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;

    serve_with_listener(config, listener, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// On shutdown the health status flips to `NotServing` before in-flight
/// requests are drained.
pub async fn serve_with_listener<F>(config: AppConfig, listener: TcpListener, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let grpc = &config.grpc;
    let local_addr = listener
        .local_addr()
        .wrap_err("Failed to read listener address")?;

    // Create repository and service layers
    let repository = InMemoryProjectRepository::new();
    let service = ProjectService::new(repository);
    let handler = ProjectServiceImpl::new(service);

    let mut projects = ProjectServiceServer::new(handler)
        .max_decoding_message_size(grpc.max_message_size)
        .max_encoding_message_size(grpc.max_message_size);
    if let Some(encoding) = grpc.compression() {
        projects = projects
            .accept_compressed(encoding)
            .send_compressed(encoding);
    }

    let (health_reporter, health_service) = health_reporter();
    let health_service = if grpc.health.enabled {
        GrpcServer::setup_health(&health_reporter, grpc, SERVICE_NAME).await;
        Some(health_service)
    } else {
        None
    };

    GrpcServer::log_startup(grpc, SERVICE_NAME);
    info!(%local_addr, "ProjectService listening");

    let shutdown = async {
        shutdown.await;
        GrpcServer::mark_not_serving(&health_reporter, grpc, SERVICE_NAME).await;
        info!("Draining in-flight requests");
    };

    GrpcServer::builder(grpc)
        .add_optional_service(health_service)
        .add_service(InterceptedService::new(projects, RequestIdInterceptor))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
        .wrap_err("gRPC server failed")?;

    info!("gRPC server stopped");
    Ok(())
}
