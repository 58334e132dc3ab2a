use tonic::metadata::MetadataValue;
use tonic::{Request, Status};

/// Metadata key carrying the correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id attached to every inbound request's extensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Read the id stored by [`RequestIdInterceptor`], or `"unknown"` when the
    /// request did not go through it.
    pub fn of<T>(request: &Request<T>) -> String {
        request
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Server-side interceptor for request correlation
///
/// Reuses the caller's `x-request-id` when present, otherwise generates a
/// UUID and writes it back into the metadata. The id is also stored as a
/// [`RequestId`] extension so handlers can put it on their span.
///
/// # Example
/// ```ignore
/// use grpc_server::interceptors::RequestIdInterceptor;
/// use tonic::service::interceptor::InterceptedService;
///
/// let svc = InterceptedService::new(ProjectServiceServer::new(handler), RequestIdInterceptor);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestIdInterceptor;

impl tonic::service::Interceptor for RequestIdInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let incoming = request
            .metadata()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned);

        let request_id = match incoming {
            Some(id) => id,
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                let value = MetadataValue::try_from(id.as_str())
                    .map_err(|_| Status::internal("Failed to create request ID"))?;
                request.metadata_mut().insert(REQUEST_ID_HEADER, value);
                id
            }
        };

        tracing::debug!(request_id = %request_id, "Incoming gRPC request");

        request.extensions_mut().insert(RequestId(request_id));
        Ok(request)
    }
}
