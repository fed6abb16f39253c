//! Error handling for odoorpc-client
//!
//! Transport and orchestration failures, plus their mapping onto the
//! canonical [`RpcError`].

use odoorpc_core::errors::{EnvelopeError, FilterConstructionError, RpcError, RpcErrorKind};
use odoorpc_core::RecordFailure;
use odoorpc_core_types::Correlation;
use thiserror::Error;

/// Failure reported by an [`crate::RpcTransport`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request never produced a response (connect, timeout, TLS)
    #[error("network error: {message}")]
    Network { message: String },

    /// The backend answered with a non-success status
    #[error("HTTP status {status}")]
    Status { status: u16, body: String },

    /// A response arrived but its body could not be read
    #[error("unreadable response body: {message}")]
    MalformedBody { message: String },
}

/// Why a fetch produced no usable batch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrchestratorError {
    /// Passed through from the transport unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("envelope: {0}")]
    EnvelopeShape(#[from] EnvelopeError),

    /// Records that failed to decode, by batch index
    #[error("{} record(s) failed to decode", failures.len())]
    Decode { failures: Vec<RecordFailure> },

    #[error("filter construction: {0}")]
    FilterConstruction(#[from] FilterConstructionError),
}

impl OrchestratorError {
    /// Canonical error tagged with the correlation of the failed fetch
    pub fn into_rpc_error(self, correlation: &Correlation) -> RpcError {
        let rpc = RpcError::from(self).with_request_id(correlation.request_id.clone());
        match &correlation.trace_id {
            Some(trace_id) => rpc.with_trace_id(trace_id.clone()),
            None => rpc,
        }
    }
}

impl From<TransportError> for RpcError {
    fn from(err: TransportError) -> Self {
        let kind = match &err {
            TransportError::Network { .. } => RpcErrorKind::Transport,
            TransportError::Status { .. } => RpcErrorKind::HttpStatus,
            TransportError::MalformedBody { .. } => RpcErrorKind::MalformedBody,
        };
        RpcError::new(kind)
            .with_op("transport_send")
            .with_message(err.to_string())
    }
}

impl From<OrchestratorError> for RpcError {
    fn from(err: OrchestratorError) -> Self {
        match err {
            OrchestratorError::Transport(e) => e.into(),
            OrchestratorError::EnvelopeShape(e) => e.into(),
            OrchestratorError::FilterConstruction(e) => e.into(),
            OrchestratorError::Decode { failures } => {
                let mut rpc = RpcError::new(RpcErrorKind::PartialBatch)
                    .with_op("decode_batch")
                    .with_message(format!("{} record(s) failed to decode", failures.len()));
                if let Some(first) = failures.first() {
                    rpc = rpc.with_index(first.index);
                    if let Some(field) = first.error.field() {
                        rpc = rpc.with_field(field);
                    }
                }
                rpc
            }
        }
    }
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> RpcError {
    RpcError::new(RpcErrorKind::Config)
        .with_op("load_config")
        .with_message(reason)
}

/// Create a configuration error for one named setting
pub fn config_field_error(field: &str, reason: impl Into<String>) -> RpcError {
    config_error(reason).with_field(field)
}
