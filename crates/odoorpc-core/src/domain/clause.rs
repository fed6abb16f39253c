//! Filter clauses and domains
//!
//! The backend expects a domain as a loosely typed JSON array of
//! `[field, operator, value]` triples. Internally the value is a tagged
//! union so every clause is checked at construction; the untyped array shape
//! only exists after serialization.

use serde::ser::{Serialize, SerializeTuple, Serializer};

/// Comparison operator of a filter clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    In,
    NotIn,
    Gt,
    Ge,
    Lt,
    Le,
    Like,
    ILike,
    ChildOf,
}

impl Operator {
    /// Wire spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Like => "like",
            Operator::ILike => "ilike",
            Operator::ChildOf => "child_of",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Scalar clause value
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

/// Right-hand side of a clause
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Clause(Box<FilterClause>),
}

impl From<Scalar> for FilterValue {
    fn from(v: Scalar) -> Self {
        FilterValue::Scalar(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Scalar(Scalar::Int(v))
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Scalar(Scalar::from(v))
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Scalar(Scalar::Str(v))
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Scalar(Scalar::Bool(v))
    }
}

impl From<Vec<Scalar>> for FilterValue {
    fn from(items: Vec<Scalar>) -> Self {
        FilterValue::List(items)
    }
}

impl From<Vec<i64>> for FilterValue {
    fn from(items: Vec<i64>) -> Self {
        FilterValue::List(items.into_iter().map(Scalar::Int).collect())
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(items: Vec<&str>) -> Self {
        FilterValue::List(items.into_iter().map(Scalar::from).collect())
    }
}

impl From<FilterClause> for FilterValue {
    fn from(clause: FilterClause) -> Self {
        FilterValue::Clause(Box::new(clause))
    }
}

/// One `(field, operator, value)` triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub field: String,
    pub operator: Operator,
    pub value: FilterValue,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

impl Serialize for FilterClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.field)?;
        tuple.serialize_element(&self.operator)?;
        tuple.serialize_element(&self.value)?;
        tuple.end()
    }
}

/// Ordered clause sequence, implicitly AND-ed by the backend
///
/// Clause order is preserved exactly; the receiving query planner is
/// sensitive to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Domain(Vec<FilterClause>);

impl Domain {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, clause: FilterClause) {
        self.0.push(clause);
    }

    /// Builder-style append
    pub fn and(mut self, clause: FilterClause) -> Self {
        self.0.push(clause);
        self
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a clause on `field` with `operator` is present
    pub fn has_clause(&self, field: &str, operator: Operator) -> bool {
        self.0
            .iter()
            .any(|c| c.field == field && c.operator == operator)
    }
}

impl From<Vec<FilterClause>> for Domain {
    fn from(clauses: Vec<FilterClause>) -> Self {
        Self(clauses)
    }
}

impl<'a> IntoIterator for &'a Domain {
    type Item = &'a FilterClause;
    type IntoIter = std::slice::Iter<'a, FilterClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
