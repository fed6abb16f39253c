//! OdooRPC Client - async query orchestration over a pluggable transport
//!
//! Ties the pure builder and decoder of `odoorpc-core` to a transport:
//!
//! ```text
//! QueryIntent ──build──▶ RequestParams ──send──▶ body ──unwrap──▶ Envelope ──decode──▶ DecodedBatch<R>
//! ```
//!
//! The transport is a trait so tests can script responses; [`HttpTransport`]
//! is the reqwest-backed implementation.

pub mod config;
pub mod errors;
pub mod http;
pub mod orchestrator;
pub mod transport;

pub use config::ClientConfig;
pub use errors::{OrchestratorError, TransportError};
pub use http::HttpTransport;
pub use orchestrator::{QueryOrchestrator, RequestPhase};
pub use transport::{HttpMethod, RpcTransport};
