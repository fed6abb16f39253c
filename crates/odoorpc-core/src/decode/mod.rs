//! Polymorphic field decoder
//!
//! Turns the backend's loosely typed JSON into typed records:
//! - `field`: per-field decode rules (optional scalar, optional relation,
//!   defaultable list)
//! - `record`: record decoders built from those rules
//! - `envelope`: search-style and call-style envelope unwrapping plus
//!   per-record batch decoding
//! - `encode`: the inverse wire encoding, for fixtures and round trips
//!
//! Nothing in here performs I/O.

pub mod encode;
pub mod envelope;
pub mod field;
pub mod record;
pub mod shape;

pub use envelope::{decode_batch, decode_envelope, DecodedBatch, Envelope, EnvelopeStyle, RecordFailure};
pub use field::{decode_pair, FieldReader};
pub use record::{decode, WireRecord};
pub use shape::Shape;
