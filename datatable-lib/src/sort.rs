//! Client-side sorting of fetched records.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::model::Record;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Error returned when parsing an unknown sort direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort direction '{0}', expected 'asc' or 'desc'")]
pub struct ParseDirectionError(pub String);

impl FromStr for SortDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Returns a sorted copy of `records`, ordered by `field`.
///
/// Missing and falsy values (null, `false`, zero, empty string) sort as the
/// empty string, so they come first ascending and last descending. Other
/// values are grouped by kind (booleans, numbers, then text) as described
/// in [`Value::compare`]. The sort is stable:
/// records with equal keys keep their relative order in both directions.
///
/// # Example
///
/// ```
/// use datatable_lib::model::{Record, Value};
/// use datatable_lib::sort::{sort_records, SortDirection};
///
/// let records = vec![
///     Record::new().set("v", Value::Null),
///     Record::new().set("v", "b"),
///     Record::new().set("v", "a"),
/// ];
/// let sorted = sort_records(&records, "v", SortDirection::Asc);
///
/// assert_eq!(sorted[0].get("v"), Some(&Value::Null));
/// assert_eq!(sorted[1].get("v"), Some(&Value::from("a")));
/// assert_eq!(sorted[2].get("v"), Some(&Value::from("b")));
/// ```
pub fn sort_records(records: &[Record], field: &str, direction: SortDirection) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| direction.apply(compare_field(a, b, field)));
    sorted
}

/// Three-way comparison of two records on one field.
pub fn compare_field(a: &Record, b: &Record, field: &str) -> Ordering {
    sort_key(a, field).compare(&sort_key(b, field))
}

fn sort_key(record: &Record, field: &str) -> Value {
    match record.get(field) {
        Some(value) if !value.is_falsy() => value.clone(),
        _ => Value::String(String::new()),
    }
}
