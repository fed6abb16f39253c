//! Response envelope unwrapping and batch decoding
//!
//! Two envelope shapes carry records:
//!
//! ```text
//! search-style: { "records": [ ... ] }
//! call-style:   { "id": 1, "jsonrpc": "2.0", "result": { "length": n, "records": [ ... ] } }
//! ```
//!
//! In the call-style shape `id`, `jsonrpc` and `length` may be omitted but
//! must have the right type when present. A missing `records` sequence is an
//! envelope failure; `"records": []` is a successful empty batch.

use serde_json::{Map, Value};

use super::{Shape, WireRecord};
use crate::errors::{DecodeError, EnvelopeError};

/// Which envelope shape a response used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStyle {
    Search,
    Call,
}

/// An unwrapped response whose records are still raw wire objects
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub style: EnvelopeStyle,
    pub id: Option<i64>,
    pub jsonrpc: Option<String>,
    /// Total match count reported by call-style responses (not `records.len()`)
    pub length: Option<i64>,
    pub records: Vec<Value>,
}

impl Envelope {
    /// Decode every record independently
    pub fn decode_records<R: WireRecord>(&self) -> DecodedBatch<R> {
        decode_batch(&self.records)
    }
}

/// A record of a batch that failed to decode, with its position in the batch
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    pub index: usize,
    pub error: DecodeError,
}

/// Outcome of decoding a batch: what decoded, and what did not
///
/// A batch is never silently truncated: every input position is either in
/// `records` (in input order) or listed in `failures`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBatch<R> {
    pub records: Vec<R>,
    pub failures: Vec<RecordFailure>,
}

impl<R> DecodedBatch<R> {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of wire records the batch was decoded from
    pub fn input_len(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    /// Indices of the records that were skipped
    pub fn failed_indices(&self) -> Vec<usize> {
        self.failures.iter().map(|f| f.index).collect()
    }

    /// All records, or the failures if any record was skipped
    ///
    /// # Errors
    ///
    /// Returns the per-index failures when the batch is incomplete.
    pub fn into_complete(self) -> Result<Vec<R>, Vec<RecordFailure>> {
        if self.failures.is_empty() {
            Ok(self.records)
        } else {
            Err(self.failures)
        }
    }
}

/// Decode each wire record independently, collecting per-index failures
pub fn decode_batch<R: WireRecord>(raw: &[Value]) -> DecodedBatch<R> {
    let mut records = Vec::with_capacity(raw.len());
    let mut failures = Vec::new();

    for (index, item) in raw.iter().enumerate() {
        match R::decode(item) {
            Ok(record) => records.push(record),
            Err(error) => failures.push(RecordFailure { index, error }),
        }
    }

    DecodedBatch { records, failures }
}

fn envelope_shape(field: &str, expected: &'static str, value: &Value) -> EnvelopeError {
    EnvelopeError::FieldShape {
        field: field.to_string(),
        expected,
        observed: Shape::of(value),
    }
}

fn records_array(field: &str, value: &Value) -> Result<Vec<Value>, EnvelopeError> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        other => Err(envelope_shape(field, "array", other)),
    }
}

fn remote_fault(error: &Value) -> EnvelopeError {
    let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown backend error")
        .to_string();
    let detail = error
        .get("data")
        .and_then(|data| data.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);

    EnvelopeError::RemoteFault {
        code,
        message,
        detail,
    }
}

fn call_envelope(top: &Map<String, Value>, result: &Value) -> Result<Envelope, EnvelopeError> {
    let result = match result {
        Value::Object(map) => map,
        other => return Err(envelope_shape("result", "object", other)),
    };

    let records = match result.get("records") {
        Some(value) => records_array("result.records", value)?,
        None => return Err(EnvelopeError::MissingRecords),
    };

    let length = match result.get("length") {
        None => None,
        Some(value) => Some(
            value
                .as_i64()
                .ok_or_else(|| envelope_shape("result.length", "integer", value))?,
        ),
    };

    let id = match top.get("id") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            value
                .as_i64()
                .ok_or_else(|| envelope_shape("id", "integer", value))?,
        ),
    };

    let jsonrpc = match top.get("jsonrpc") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => return Err(envelope_shape("jsonrpc", "string", other)),
    };

    Ok(Envelope {
        style: EnvelopeStyle::Call,
        id,
        jsonrpc,
        length,
        records,
    })
}

/// Parse a response body and locate its `records` sequence
///
/// # Errors
///
/// Returns an [`EnvelopeError`] when the body is not JSON, carries a
/// JSON-RPC `error` member, or has no decodable `records` sequence.
pub fn decode_envelope(body: &[u8]) -> Result<Envelope, EnvelopeError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| EnvelopeError::InvalidJson {
        message: e.to_string(),
    })?;

    let top = match &value {
        Value::Object(map) => map,
        other => {
            return Err(EnvelopeError::NotAnObject {
                observed: Shape::of(other),
            })
        }
    };

    if let Some(error) = top.get("error") {
        return Err(remote_fault(error));
    }

    if let Some(records) = top.get("records") {
        return Ok(Envelope {
            style: EnvelopeStyle::Search,
            id: None,
            jsonrpc: None,
            length: None,
            records: records_array("records", records)?,
        });
    }

    match top.get("result") {
        Some(result) => call_envelope(top, result),
        None => Err(EnvelopeError::MissingRecords),
    }
}
