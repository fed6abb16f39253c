//! Outbound parameter structures
//!
//! ```text
//! search_read: { "model", "limit"?, "domain", "fields", "context" }
//! call_kw:     { "model", "method", "args": [], "kwargs": { "domain", "fields", "limit"?, "offset"?, "order"?, "context" } }
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use super::clause::Domain;
use crate::errors::FilterConstructionError;

/// Reserved key the request context is merged under
pub const CONTEXT_KEY: &str = "context";

/// Parameters for a `search_read` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestParams {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    pub domain: Domain,
    pub fields: Vec<String>,
    pub context: Map<String, Value>,
}

impl RequestParams {
    /// Check the invariants the builder guarantees
    ///
    /// # Errors
    ///
    /// Returns a [`FilterConstructionError`] if the domain or projection is
    /// empty or a clause has no field name.
    pub fn validate(&self) -> Result<(), FilterConstructionError> {
        validate_parts(&self.model, &self.domain, &self.fields, false)
    }
}

/// Keyword arguments of a `call_kw` search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchKwargs {
    pub domain: Domain,
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    pub context: Map<String, Value>,
}

/// Parameters for a `call_kw` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallKwParams {
    pub model: String,
    pub method: String,
    pub args: Vec<Value>,
    pub kwargs: SearchKwargs,
}

impl CallKwParams {
    /// Like [`RequestParams::validate`], except that an empty domain is
    /// allowed: a free-form search may match every record.
    ///
    /// # Errors
    ///
    /// Returns a [`FilterConstructionError`] if the projection is empty or a
    /// clause has no field name.
    pub fn validate(&self) -> Result<(), FilterConstructionError> {
        validate_parts(&self.model, &self.kwargs.domain, &self.kwargs.fields, true)
    }
}

fn validate_parts(
    model: &str,
    domain: &Domain,
    fields: &[String],
    allow_empty_domain: bool,
) -> Result<(), FilterConstructionError> {
    if domain.is_empty() && !allow_empty_domain {
        return Err(FilterConstructionError::EmptyDomain {
            model: model.to_string(),
        });
    }
    if fields.is_empty() {
        return Err(FilterConstructionError::EmptyProjection {
            model: model.to_string(),
        });
    }
    if let Some(position) = domain.clauses().iter().position(|c| c.field.is_empty()) {
        return Err(FilterConstructionError::EmptyClauseField { position });
    }
    Ok(())
}
