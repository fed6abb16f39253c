//! reqwest-backed transport
//!
//! Each call is wrapped in a JSON-RPC 2.0 envelope before it is posted:
//!
//! ```text
//! { "jsonrpc": "2.0", "method": "call", "params": <params>, "id": <n> }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use odoorpc_core::RpcError;
use odoorpc_core_types::Sensitive;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::errors::{config_error, TransportError};
use crate::transport::{HttpMethod, RpcTransport};

const SESSION_COOKIE: &str = "session_id";

/// Wrap call parameters in a JSON-RPC 2.0 `call` request
pub fn rpc_call_body(params: &Value, id: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "call",
        "params": params,
        "id": id,
    })
}

/// HTTP transport talking to one backend base URL
pub struct HttpTransport {
    client: Client,
    base_url: String,
    session_id: Option<Sensitive<String>>,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_id: None,
            next_id: AtomicU64::new(1),
        })
    }

    /// Build a transport for a validated configuration
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, RpcError> {
        config.validate()?;
        Self::new(config.base_url.clone(), config.timeout())
            .map_err(|e| config_error(format!("cannot build HTTP client: {}", e)))
    }

    /// Authenticate calls with an existing backend session
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(Sensitive::new(session_id.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn send(
        &self,
        endpoint: &str,
        method: HttpMethod,
        params: &Value,
    ) -> Result<Vec<u8>, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = self.url(endpoint);

        let mut request = match method {
            HttpMethod::Post => self.client.post(&url),
        };
        request = request
            .header(CONTENT_TYPE, "application/json")
            .json(&rpc_call_body(params, id));

        if let Some(session_id) = &self.session_id {
            request = request.header(COOKIE, format!("{}={}", SESSION_COOKIE, session_id.expose()));
        }

        tracing::debug!(
            endpoint = endpoint,
            method = method.as_str(),
            rpc_id = id,
            authenticated = self.session_id.is_some(),
            "sending rpc call"
        );

        let response = request.send().await.map_err(|e| TransportError::Network {
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::MalformedBody {
                message: e.to_string(),
            })?;

        Ok(bytes.to_vec())
    }
}
