//! OdooRPC Core - decoding and query construction for a loosely typed RPC backend
//!
//! This crate contains the pure half of the access layer:
//! - Typed records (`Message`, `ChannelMessage`, `IdNamePair`) and the
//!   backend request context
//! - A tolerant decoder for the wire format, where `false` stands for an
//!   absent value and relations are positional `[id, name]` pairs
//! - Envelope unwrapping with per-record batch decoding
//! - The domain/filter builder producing `search_read` and `call_kw`
//!   parameters for each query intent
//! - The error and logging facilities shared with the client crate
//!
//! Nothing in this crate performs I/O.

pub mod decode;
pub mod domain;
pub mod errors;
pub mod logging_facility;
pub mod model;

#[doc(hidden)]
pub use odoorpc_core_types as core_types;

// Re-export commonly used types
pub use decode::{decode, decode_batch, decode_envelope, DecodedBatch, RecordFailure, WireRecord};
pub use domain::{build, DomainBuilder, QueryIntent, RequestParams};
pub use errors::{DecodeError, EnvelopeError, FilterConstructionError, Result, RpcError, RpcErrorKind};
pub use model::{ChannelMessage, IdNamePair, Message, RecordRef, RequestContext};
