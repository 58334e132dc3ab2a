//! Projects gRPC Service
//!
//! A microservice exposing `tasks.v1.ProjectService`.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (gRPC with Zstd compression, x-request-id)
//! ProjectServiceImpl (service.rs)
//!   ↓ (validate → convert → call → map status)
//! ProjectService (domain layer)
//!   ↓ (canonical name, state transitions)
//! InMemoryProjectRepository (persistence)
//! ```
//!
//! ## Modules
//!
//! - `config`: YAML/environment configuration
//! - `server`: Server initialization and lifecycle
//! - `service`: gRPC service implementation (ProjectServiceImpl)

pub mod config;
pub mod server;
pub mod service;

// Re-export for convenience
pub use config::AppConfig;
pub use server::{run, serve_with_listener};
pub use service::{ProjectServiceImpl, UnimplementedProjectService};
