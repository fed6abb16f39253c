use serde_json::Value;
use std::fmt;

/// Observed JSON shape of a wire value, used in decode diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Null,
    False,
    True,
    Integer,
    /// A number that is not representable as an `i64`
    Float,
    String,
    /// Array with its element count
    Array(usize),
    Object,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(false) => Shape::False,
            Value::Bool(true) => Shape::True,
            Value::Number(n) if n.is_i64() => Shape::Integer,
            Value::Number(_) => Shape::Float,
            Value::String(_) => Shape::String,
            Value::Array(items) => Shape::Array(items.len()),
            Value::Object(_) => Shape::Object,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Null => f.write_str("null"),
            Shape::False => f.write_str("false"),
            Shape::True => f.write_str("true"),
            Shape::Integer => f.write_str("integer"),
            Shape::Float => f.write_str("non-integer number"),
            Shape::String => f.write_str("string"),
            Shape::Array(len) => write!(f, "array of {}", len),
            Shape::Object => f.write_str("object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_of_distinguishes_booleans() {
        assert_eq!(Shape::of(&json!(false)), Shape::False);
        assert_eq!(Shape::of(&json!(true)), Shape::True);
    }

    #[test]
    fn test_shape_of_numbers() {
        assert_eq!(Shape::of(&json!(42)), Shape::Integer);
        assert_eq!(Shape::of(&json!(-7)), Shape::Integer);
        assert_eq!(Shape::of(&json!(4.5)), Shape::Float);
    }

    #[test]
    fn test_array_shape_reports_arity() {
        let shape = Shape::of(&json!([1, "a", 3]));
        assert_eq!(shape, Shape::Array(3));
        assert_eq!(shape.to_string(), "array of 3");
    }
}
