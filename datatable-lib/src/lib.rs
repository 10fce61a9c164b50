//! Data table pipeline library
//!
//! Drives a configurable, paginated, searchable and sortable record table:
//! a named custom setting describes the table, a remote record service
//! supplies the rows, and searching and sorting happen client-side over the
//! rows fetched so far.

pub mod config;
pub mod error;
pub mod host;
pub mod link;
pub mod loader;
pub mod model;
pub mod query;
pub mod search;
pub mod settings;
pub mod sort;
pub mod table;

pub use table::DataTable;
pub use table::TableOptions;
