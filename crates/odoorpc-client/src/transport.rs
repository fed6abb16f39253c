//! Transport seam between the orchestrator and the network

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::TransportError;

/// HTTP verb used for a call
///
/// The JSON-RPC dataset endpoints only accept POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

/// Sends one parameter set to an endpoint and returns the raw response body
///
/// Implementations own timeouts and connection handling. The orchestrator
/// makes exactly one `send` per fetch and never retries.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn send(
        &self,
        endpoint: &str,
        method: HttpMethod,
        params: &Value,
    ) -> Result<Vec<u8>, TransportError>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for std::sync::Arc<T> {
    async fn send(
        &self,
        endpoint: &str,
        method: HttpMethod,
        params: &Value,
    ) -> Result<Vec<u8>, TransportError> {
        (**self).send(endpoint, method, params).await
    }
}
