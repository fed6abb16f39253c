//! Field-level decode rules for wire records
//!
//! Each accessor implements one decode rule. Only the documented ambiguity
//! patterns get lenient handling; anything else that is present with the
//! wrong shape is a [`DecodeError::FieldShape`] naming the field.
//!
//! - *Optional scalar*: string, or a boolean / `null` / missing meaning absent.
//! - *Optional relation*: `[integer, string]`, or a boolean / `null` / missing
//!   meaning absent. A present sequence of any other arity or element type is
//!   an error, not an absent relation.
//! - *Defaultable list*: missing key or `null` means empty; any other value is
//!   decoded strictly.

use serde_json::{Map, Value};

use super::Shape;
use crate::errors::DecodeError;
use crate::model::IdNamePair;

const EXPECT_INTEGER: &str = "integer";
const EXPECT_STRING: &str = "string";
const EXPECT_BOOL: &str = "boolean";
const EXPECT_OPTIONAL_STRING: &str = "string or false";
const EXPECT_RELATION: &str = "[integer, string] or false";
const EXPECT_ID_LIST: &str = "array of integers";
const EXPECT_NULLABLE_ID: &str = "integer or null";

fn shape_error(field: impl Into<String>, expected: &'static str, value: &Value) -> DecodeError {
    DecodeError::FieldShape {
        field: field.into(),
        expected,
        observed: Shape::of(value),
    }
}

/// Read-only view over one wire record
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    raw: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    /// Wrap a wire record, failing if it is not a JSON object
    pub fn new(raw: &'a Value) -> Result<Self, DecodeError> {
        match raw {
            Value::Object(map) => Ok(Self { raw: map }),
            other => Err(DecodeError::NotAnObject {
                observed: Shape::of(other),
            }),
        }
    }

    fn require(&self, field: &str) -> Result<&'a Value, DecodeError> {
        self.raw.get(field).ok_or_else(|| DecodeError::MissingField {
            field: field.to_string(),
        })
    }

    pub fn int(&self, field: &str) -> Result<i64, DecodeError> {
        let value = self.require(field)?;
        value
            .as_i64()
            .ok_or_else(|| shape_error(field, EXPECT_INTEGER, value))
    }

    pub fn string(&self, field: &str) -> Result<String, DecodeError> {
        match self.require(field)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(shape_error(field, EXPECT_STRING, other)),
        }
    }

    pub fn boolean(&self, field: &str) -> Result<bool, DecodeError> {
        match self.require(field)? {
            Value::Bool(b) => Ok(*b),
            other => Err(shape_error(field, EXPECT_BOOL, other)),
        }
    }

    /// Optional scalar pattern: string, else a boolean as absent, else error
    pub fn optional_string(&self, field: &str) -> Result<Option<String>, DecodeError> {
        match self.raw.get(field) {
            None | Some(Value::Null) | Some(Value::Bool(_)) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(shape_error(field, EXPECT_OPTIONAL_STRING, other)),
        }
    }

    /// Optional relation pattern: `[id, name]`, else a boolean/missing as absent
    pub fn optional_relation(&self, field: &str) -> Result<Option<IdNamePair>, DecodeError> {
        match self.raw.get(field) {
            None | Some(Value::Null) | Some(Value::Bool(_)) => Ok(None),
            Some(value) => decode_pair(field, value).map(Some),
        }
    }

    /// Strict list of integer ids; the key must be present
    pub fn id_list(&self, field: &str) -> Result<Vec<i64>, DecodeError> {
        decode_id_list(field, self.require(field)?)
    }

    /// Defaultable list pattern: missing key or `null` yields an empty list
    pub fn id_list_or_empty(&self, field: &str) -> Result<Vec<i64>, DecodeError> {
        match self.raw.get(field) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => decode_id_list(field, value),
        }
    }

    /// Defaultable list whose elements may individually be `null`
    ///
    /// Null elements are kept in place as `None`, so the element count
    /// always matches the wire.
    pub fn nullable_id_list_or_empty(&self, field: &str) -> Result<Vec<Option<i64>>, DecodeError> {
        let items = match self.raw.get(field) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(shape_error(field, EXPECT_ID_LIST, other)),
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Null => Ok(None),
                other => other
                    .as_i64()
                    .map(Some)
                    .ok_or_else(|| shape_error(format!("{}[{}]", field, i), EXPECT_NULLABLE_ID, other)),
            })
            .collect()
    }
}

/// Decode a positional `[id, name]` pair
///
/// Exactly two elements are required: an integer, then a string.
pub fn decode_pair(field: &str, value: &Value) -> Result<IdNamePair, DecodeError> {
    let items = match value {
        Value::Array(items) if items.len() == 2 => items,
        other => return Err(shape_error(field, EXPECT_RELATION, other)),
    };

    let id = items[0]
        .as_i64()
        .ok_or_else(|| shape_error(format!("{}[0]", field), EXPECT_INTEGER, &items[0]))?;
    let name = match &items[1] {
        Value::String(s) => s.clone(),
        other => return Err(shape_error(format!("{}[1]", field), EXPECT_STRING, other)),
    };

    Ok(IdNamePair { id, name })
}

fn decode_id_list(field: &str, value: &Value) -> Result<Vec<i64>, DecodeError> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(shape_error(field, EXPECT_ID_LIST, other)),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_i64()
                .ok_or_else(|| shape_error(format!("{}[{}]", field, i), EXPECT_INTEGER, item))
        })
        .collect()
}
