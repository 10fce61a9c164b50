//! Navigation links for fetched records.

use crate::model::Record;
use crate::model::URL_LINK_FIELD;

/// Returns a copy of `record` carrying `urlLink = "/" + Id`.
///
/// The input is left untouched. A record without an `Id` links to `"/"`.
///
/// # Example
///
/// ```
/// use datatable_lib::link::with_link;
/// use datatable_lib::model::Record;
///
/// let record = Record::new().set("Id", "001");
/// assert_eq!(with_link(&record).url_link(), Some("/001"));
/// assert_eq!(record.url_link(), None);
/// ```
pub fn with_link(record: &Record) -> Record {
    let mut linked = record.clone();
    linked.insert(URL_LINK_FIELD, link_for(record));
    linked
}

/// Decorates a whole page of records.
pub fn decorate(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .map(|mut record| {
            let link = link_for(&record);
            record.insert(URL_LINK_FIELD, link);
            record
        })
        .collect()
}

fn link_for(record: &Record) -> String {
    format!("/{}", record.id().unwrap_or_default())
}
