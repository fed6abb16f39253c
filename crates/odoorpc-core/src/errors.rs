use crate::decode::Shape;
use odoorpc_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using the canonical RpcError
pub type Result<T> = std::result::Result<T, RpcError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure the access layer can surface maps onto one of these kinds,
/// and each kind has a stable code for programmatic handling and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcErrorKind {
    // Decoding
    FieldShape,
    MissingField,
    NotAnObject,

    // Envelope
    EnvelopeShape,
    RemoteFault,

    // Query construction
    /// Builder produced parameters that violate their own invariants (builder defect)
    FilterConstruction,

    // Transport
    Transport,
    HttpStatus,
    MalformedBody,

    // Batch
    /// At least one record of a batch could not be decoded
    PartialBatch,

    Config,
}

impl RpcErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            RpcErrorKind::FieldShape => "ERR_FIELD_SHAPE",
            RpcErrorKind::MissingField => "ERR_MISSING_FIELD",
            RpcErrorKind::NotAnObject => "ERR_NOT_AN_OBJECT",
            RpcErrorKind::EnvelopeShape => "ERR_ENVELOPE_SHAPE",
            RpcErrorKind::RemoteFault => "ERR_REMOTE_FAULT",
            RpcErrorKind::FilterConstruction => "ERR_FILTER_CONSTRUCTION",
            RpcErrorKind::Transport => "ERR_TRANSPORT",
            RpcErrorKind::HttpStatus => "ERR_HTTP_STATUS",
            RpcErrorKind::MalformedBody => "ERR_MALFORMED_BODY",
            RpcErrorKind::PartialBatch => "ERR_PARTIAL_BATCH",
            RpcErrorKind::Config => "ERR_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context was known where the
/// failure was observed: the operation, the offending field, the batch index
/// and the correlation ids of the call.
#[derive(Debug, Clone)]
pub struct RpcError {
    kind: RpcErrorKind,
    op: Option<String>,
    field: Option<String>,
    index: Option<usize>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl RpcError {
    pub fn new(kind: RpcErrorKind) -> Self {
        Self {
            kind,
            op: None,
            field: None,
            index: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the wire field name the error refers to
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add the position of the failing record inside its batch
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> RpcErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {})", index)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RpcError {}

// ========== End Error Facility ==========

/// A single wire record could not be turned into a typed record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The field is present but has a shape none of its decode rules accept
    #[error("field '{field}': expected {expected}, found {observed}")]
    FieldShape {
        field: String,
        expected: &'static str,
        observed: Shape,
    },

    /// A required field is absent from the record
    #[error("field '{field}' is missing")]
    MissingField { field: String },

    /// The record itself is not a JSON object
    #[error("record is not an object: found {observed}")]
    NotAnObject { observed: Shape },
}

impl DecodeError {
    /// Name of the offending field, when the failure is field-specific
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodeError::FieldShape { field, .. } | DecodeError::MissingField { field } => {
                Some(field)
            }
            DecodeError::NotAnObject { .. } => None,
        }
    }
}

/// The response body does not contain a decodable `records` sequence
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvelopeError {
    #[error("response body is not valid JSON: {message}")]
    InvalidJson { message: String },

    #[error("response is not a JSON object: found {observed}")]
    NotAnObject { observed: Shape },

    /// Neither `records` nor `result.records` is present
    #[error("response has no `records` sequence")]
    MissingRecords,

    #[error("envelope field '{field}': expected {expected}, found {observed}")]
    FieldShape {
        field: String,
        expected: &'static str,
        observed: Shape,
    },

    /// The backend answered with a JSON-RPC `error` member instead of a result
    #[error("backend fault {code}: {message}")]
    RemoteFault {
        code: i64,
        message: String,
        detail: Option<String>,
    },
}

/// Built parameters violate an invariant the builder is supposed to guarantee
///
/// Never caused by caller input: every `QueryIntent` variant is statically
/// valid, so an occurrence means the builder itself is wrong.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterConstructionError {
    #[error("domain for model {model} is empty")]
    EmptyDomain { model: String },

    #[error("field projection for model {model} is empty")]
    EmptyProjection { model: String },

    #[error("clause field name at position {position} is empty")]
    EmptyClauseField { position: usize },

    #[error("parameters could not be serialized: {message}")]
    Unserializable { message: String },
}

impl From<DecodeError> for RpcError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::FieldShape {
                field,
                expected,
                observed,
            } => RpcError::new(RpcErrorKind::FieldShape)
                .with_op("decode_record")
                .with_message(format!("expected {}, found {}", expected, observed))
                .with_field(field),

            DecodeError::MissingField { field } => RpcError::new(RpcErrorKind::MissingField)
                .with_op("decode_record")
                .with_message("required field is missing")
                .with_field(field),

            DecodeError::NotAnObject { observed } => RpcError::new(RpcErrorKind::NotAnObject)
                .with_op("decode_record")
                .with_message(format!("record is {}", observed)),
        }
    }
}

impl From<EnvelopeError> for RpcError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::RemoteFault { code, message, .. } => {
                RpcError::new(RpcErrorKind::RemoteFault)
                    .with_op("decode_envelope")
                    .with_message(format!("code {}: {}", code, message))
            }
            EnvelopeError::FieldShape { ref field, .. } => {
                let field = field.clone();
                RpcError::new(RpcErrorKind::EnvelopeShape)
                    .with_op("decode_envelope")
                    .with_message(err.to_string())
                    .with_field(field)
            }
            other => RpcError::new(RpcErrorKind::EnvelopeShape)
                .with_op("decode_envelope")
                .with_message(other.to_string()),
        }
    }
}

impl From<FilterConstructionError> for RpcError {
    fn from(err: FilterConstructionError) -> Self {
        RpcError::new(RpcErrorKind::FilterConstruction)
            .with_op("build_params")
            .with_message(err.to_string())
    }
}
