//! Encoding of typed values back into the backend's wire conventions
//!
//! The inverse of the field decode rules: absent optionals become `false`,
//! relations become positional pairs.

use serde_json::{json, Value};

use crate::model::IdNamePair;

pub fn optional_string(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::String(s.clone()),
        None => Value::Bool(false),
    }
}

pub fn relation(value: &Option<IdNamePair>) -> Value {
    match value {
        Some(pair) => pair_value(pair),
        None => Value::Bool(false),
    }
}

pub fn pair_value(pair: &IdNamePair) -> Value {
    json!([pair.id, pair.name])
}

pub fn nullable_ids(ids: &[Option<i64>]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| id.map(Value::from).unwrap_or(Value::Null))
            .collect(),
    )
}
