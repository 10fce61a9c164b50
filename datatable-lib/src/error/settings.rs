//! Settings storage errors

/// Errors raised by a [`SettingsBackend`](crate::settings::SettingsBackend).
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The SQLite store failed.
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),

    /// A stored value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
