//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A dynamic value held by a record field.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | boolean | `Bool` |
/// | integer (fits i32) | `Int` |
/// | integer | `Long` |
/// | fractional number | `Float` |
/// | string | `String` |
/// | object, array | `Json` |
///
/// Every value has a textual form (its [`Display`](fmt::Display) output) which
/// is what search and sort operate on.
///
/// # Example
///
/// ```
/// use datatable_lib::model::Value;
///
/// assert_eq!(Value::from("Acme").to_string(), "Acme");
/// assert_eq!(Value::from(42i64).to_string(), "42");
/// assert_eq!(Value::from(true).to_string(), "true");
/// assert_eq!(Value::Null.to_string(), "null");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Nested relationship object or array, kept as raw JSON.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for values a host script would treat as false in a
    /// boolean context: null, `false`, zero, NaN and the empty string.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Long(n) => *n == 0,
            Value::Float(f) => *f == 0.0 || f.is_nan(),
            Value::String(s) => s.is_empty(),
            Value::Json(_) => false,
        }
    }

    /// Returns the numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(f64::from(*n)),
            Value::Long(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Three-way comparison used for client-side sorting.
    ///
    /// Values are grouped by kind first: null and the empty string, then
    /// booleans, then numbers, then text and nested JSON. Within a group
    /// booleans compare `false < true`, numbers compare numerically and
    /// text compares lexicographically, so the result is a total order even
    /// over columns mixing numbers and numeric strings.
    pub fn compare(&self, other: &Value) -> Ordering {
        self.sort_rank()
            .cmp(&other.sort_rank())
            .then_with(|| match (self, other) {
                (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
                _ => match (self.as_f64(), other.as_f64()) {
                    (Some(a), Some(b)) => a.total_cmp(&b),
                    (None, None) if self.sort_rank() == 0 => Ordering::Equal,
                    _ => self.to_string().cmp(&other.to_string()),
                },
            })
    }

    fn sort_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::String(s) if s.is_empty() => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Long(_) | Value::Float(_) => 2,
            Value::String(_) | Value::Json(_) => 3,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}", n),
            Value::Float(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Json(v) => write!(f, "{}", v),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(small) => Value::Int(small),
                        Err(_) => Value::Long(i),
                    }
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Json(serde_json::Value::Number(n))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            other => Value::Json(other),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_host_coercion() {
        assert_eq!(Value::Float(1.0).to_string(), "1");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(
            Value::Json(serde_json::json!({"Name": "Owner"})).to_string(),
            r#"{"Name":"Owner"}"#
        );
    }

    #[test]
    fn test_falsy_values() {
        assert!(Value::Null.is_falsy());
        assert!(Value::Bool(false).is_falsy());
        assert!(Value::Int(0).is_falsy());
        assert!(Value::Float(f64::NAN).is_falsy());
        assert!(Value::from("").is_falsy());
        assert!(!Value::from("0").is_falsy());
        assert!(!Value::Json(serde_json::json!([])).is_falsy());
    }

    #[test]
    fn test_compare_numbers_numerically() {
        assert_eq!(Value::Int(9).compare(&Value::Long(10)), Ordering::Less);
        assert_eq!(Value::Float(2.5).compare(&Value::Int(2)), Ordering::Greater);
        // As text "9" > "10"; numeric comparison must win.
        assert_eq!(Value::Int(10).compare(&Value::Int(9)), Ordering::Greater);
    }

    #[test]
    fn test_compare_groups_by_kind() {
        assert_eq!(Value::Null.compare(&Value::from("")), Ordering::Equal);
        assert_eq!(Value::from("").compare(&Value::Bool(false)), Ordering::Less);
        assert_eq!(Value::Bool(true).compare(&Value::Int(-5)), Ordering::Less);
        assert_eq!(Value::from("b").compare(&Value::from("a")), Ordering::Greater);
        // A numeric string is text, and text follows every number.
        assert_eq!(Value::from("5").compare(&Value::Int(50)), Ordering::Greater);
        assert_eq!(Value::Int(9).compare(&Value::from("10")), Ordering::Less);
    }

    #[test]
    fn test_compare_is_transitive_across_kinds() {
        let values = [
            Value::Int(9),
            Value::Int(10),
            Value::from("50"),
            Value::from("9"),
            Value::Float(9.5),
            Value::Long(10),
            Value::Bool(true),
            Value::Null,
            Value::Json(serde_json::json!({"Name": "x"})),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(a.compare(b), b.compare(a).reverse());
                for c in &values {
                    if a.compare(b) != Ordering::Greater && b.compare(c) != Ordering::Greater {
                        assert_ne!(a.compare(c), Ordering::Greater, "{a:?} {b:?} {c:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_from_json_number_widths() {
        assert_eq!(Value::from(serde_json::json!(7)), Value::Int(7));
        assert_eq!(
            Value::from(serde_json::json!(5_000_000_000i64)),
            Value::Long(5_000_000_000)
        );
        assert_eq!(Value::from(serde_json::json!(1.5)), Value::Float(1.5));
    }
}
