//! # gRPC Server Library
//!
//! Shared plumbing for the tonic services in the monorepo: server
//! configuration, HTTP/2 tuning, health reporting, request-id propagation,
//! and protobuf ↔ domain helpers.
//!
//! ## Quick Start
//!
//! ```ignore
//! use grpc_server::{GrpcServer, RequestIdInterceptor, ServerConfig};
//! use rpc::tasks::v1::project_service_server::{ProjectServiceServer, SERVICE_NAME};
//! use tonic::service::interceptor::InterceptedService;
//!
//! let config = ServerConfig::default();
//! let (health_reporter, health_service) = tonic_health::server::health_reporter();
//! GrpcServer::setup_health(&health_reporter, &config, SERVICE_NAME).await;
//!
//! let service = ProjectServiceServer::new(my_impl)
//!     .max_decoding_message_size(config.max_message_size);
//!
//! GrpcServer::builder(&config)
//!     .add_service(health_service)
//!     .add_service(InterceptedService::new(service, RequestIdInterceptor))
//!     .serve(config.socket_addr()?)
//!     .await?;
//! ```

pub mod conversions;
pub mod error;
pub mod interceptors;
pub mod server;

pub use error::{GrpcError, GrpcResult, ToTonicOption, ToTonicResult};
pub use interceptors::{RequestId, RequestIdInterceptor};
pub use server::{GrpcServer, HealthConfig, KeepaliveConfig, ServerConfig, shutdown_signal};
