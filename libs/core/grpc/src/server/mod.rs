//! gRPC Server Builder
//!
//! Provides utilities for creating production-ready gRPC servers
//! with health checks, compression, and standard configurations.
//!
//! ```ignore
//! use grpc_server::server::{GrpcServer, ServerConfig, shutdown_signal};
//! use rpc::tasks::v1::project_service_server::{ProjectServiceServer, SERVICE_NAME};
//!
//! let config = ServerConfig::default();
//! let (health_reporter, health_service) = tonic_health::server::health_reporter();
//!
//! GrpcServer::setup_health(&health_reporter, &config, SERVICE_NAME).await;
//! GrpcServer::log_startup(&config, SERVICE_NAME);
//!
//! GrpcServer::builder(&config)
//!     .add_service(health_service)
//!     .add_service(ProjectServiceServer::new(my_impl))
//!     .serve_with_shutdown(config.socket_addr()?, shutdown_signal())
//!     .await?;
//! ```

mod builder;
mod config;

pub use builder::{GrpcServer, shutdown_signal};
pub use config::{HealthConfig, KeepaliveConfig, ServerConfig};
