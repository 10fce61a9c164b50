//! Client-side search over fetched records.

use crate::model::Record;

/// Returns the records where at least one of `fields` contains `term`.
///
/// Matching is a case-insensitive substring test against each value's
/// textual form, so numbers and booleans match as printed (`42`, `true`)
/// and nulls as `null`. An empty term matches every record. Fields not in
/// `fields` are never inspected.
///
/// # Example
///
/// ```
/// use datatable_lib::model::Record;
/// use datatable_lib::search::search;
///
/// let buffer = vec![
///     Record::new().set("Id", "1").set("Name", "Acme"),
///     Record::new().set("Id", "2").set("Name", "Zeta"),
/// ];
/// let hits = search(&buffer, &["Name".to_string()], "ze");
///
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id().as_deref(), Some("2"));
/// ```
pub fn search(records: &[Record], fields: &[String], term: &str) -> Vec<Record> {
    if term.is_empty() {
        return records.to_vec();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, fields, &needle))
        .cloned()
        .collect()
}

fn matches(record: &Record, fields: &[String], needle: &str) -> bool {
    fields.iter().any(|field| {
        record
            .get(field)
            .is_some_and(|value| value.to_string().to_lowercase().contains(needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn buffer() -> Vec<Record> {
        vec![
            Record::new().set("Id", "1").set("Name", "Acme").set("Amount", 1500i32),
            Record::new().set("Id", "2").set("Name", "Zeta").set("Amount", 42i32),
            Record::new()
                .set("Id", "3")
                .set("Name", "Globex")
                .set("Amount", Value::Null)
                .set("IsWon", true),
        ]
    }

    #[test]
    fn test_empty_term_returns_everything_in_order() {
        let buffer = buffer();
        assert_eq!(search(&buffer, &fields(&["Name"]), ""), buffer);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let hits = search(&buffer(), &fields(&["Name"]), "ZE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id().as_deref(), Some("2"));

        let hits = search(&buffer(), &fields(&["Name"]), "e");
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_numbers_and_booleans_match_as_text() {
        let hits = search(&buffer(), &fields(&["Amount"]), "50");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id().as_deref(), Some("1"));

        let hits = search(&buffer(), &fields(&["IsWon"]), "TRUE");
        assert_eq!(hits.len(), 1);

        let hits = search(&buffer(), &fields(&["Amount"]), "null");
        assert_eq!(hits[0].id().as_deref(), Some("3"));
    }

    #[test]
    fn test_unlisted_fields_are_ignored() {
        // "Id" holds "2" but is not a search field.
        assert!(search(&buffer(), &fields(&["Name"]), "2").is_empty());
    }

    #[test]
    fn test_search_is_idempotent() {
        let once = search(&buffer(), &fields(&["Name"]), "a");
        let twice = search(&once, &fields(&["Name"]), "a");
        assert_eq!(once, twice);
    }
}
