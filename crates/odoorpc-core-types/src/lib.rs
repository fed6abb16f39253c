//! Core types shared across the OdooRPC crates
//!
//! This crate provides foundational types used by the error, logging and
//! transport facilities:
//!
//! - **Correlation types**: RequestId, TraceId, Correlation
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{Correlation, RequestId, TraceId};
pub use sensitive::Sensitive;
