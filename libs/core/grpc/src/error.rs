use std::fmt::Display;
use thiserror::Error;

pub type GrpcResult<T> = Result<T, GrpcError>;

/// Errors that can occur while configuring or running a gRPC server
#[derive(Error, Debug)]
pub enum GrpcError {
  /// Host/port pair does not form a socket address
  #[error("Invalid listen address '{addr}': {source}")]
  InvalidAddress {
    addr: String,
    #[source]
    source: std::net::AddrParseError,
  },

  /// Listener could not be bound
  #[error("Failed to bind {addr}: {source}")]
  Bind {
    addr: String,
    #[source]
    source: std::io::Error,
  },

  /// Transport failed while serving
  #[error("Transport error: {0}")]
  Transport(#[from] tonic::transport::Error),
}

// ============================================================================
// Generic Error Conversion Traits
// ============================================================================

/// Extension trait for Result types to convert errors to tonic::Status
///
/// The error's `Display` text becomes the status message, so only use it for
/// errors that are safe to show to the caller (validation and conversion
/// failures).
///
/// # Example
/// ```ignore
/// use grpc_server::error::ToTonicResult;
///
/// let state = ProjectState::try_from(wire_state).to_tonic()?;
/// ```
pub trait ToTonicResult<T> {
  /// Convert the error in this Result to a tonic::Status with INVALID_ARGUMENT code
  fn to_tonic(self) -> Result<T, tonic::Status>;

  /// Convert the error to a tonic::Status with a custom code
  fn to_tonic_with_code(self, code: tonic::Code) -> Result<T, tonic::Status>;
}

impl<T, E: Display> ToTonicResult<T> for Result<T, E> {
  fn to_tonic(self) -> Result<T, tonic::Status> {
    self.map_err(|e| tonic::Status::invalid_argument(e.to_string()))
  }

  fn to_tonic_with_code(self, code: tonic::Code) -> Result<T, tonic::Status> {
    self.map_err(|e| tonic::Status::new(code, e.to_string()))
  }
}

/// Extension trait for Option types to convert None to tonic::Status errors
///
/// # Example
/// ```ignore
/// use grpc_server::error::ToTonicOption;
///
/// let project = request.project.ok_or_invalid("project is required")?;
/// ```
pub trait ToTonicOption<T> {
  /// Convert None to a tonic::Status with NOT_FOUND code
  fn ok_or_not_found(self, message: impl Into<String>) -> Result<T, tonic::Status>;

  /// Convert None to a tonic::Status with INVALID_ARGUMENT code
  fn ok_or_invalid(self, message: impl Into<String>) -> Result<T, tonic::Status>;
}

impl<T> ToTonicOption<T> for Option<T> {
  fn ok_or_not_found(self, message: impl Into<String>) -> Result<T, tonic::Status> {
    self.ok_or_else(|| tonic::Status::not_found(message.into()))
  }

  fn ok_or_invalid(self, message: impl Into<String>) -> Result<T, tonic::Status> {
    self.ok_or_else(|| tonic::Status::invalid_argument(message.into()))
  }
}
