//! Configuration resolution errors

use super::SettingsError;

/// Errors that can occur while resolving a table configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration name was empty.
    #[error("Configuration name must not be empty")]
    InvalidName,

    /// No settings record exists under the given name.
    #[error("Configuration '{name}' not found")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The column definitions could not be decoded.
    #[error("Configuration '{name}' has malformed column definitions: {source}")]
    Malformed {
        /// The name of the offending configuration.
        name: String,
        /// The underlying decode error.
        source: serde_json::Error,
    },

    /// The settings store failed.
    #[error("Settings backend error: {0}")]
    Backend(#[from] SettingsError),
}

impl ConfigError {
    /// Creates a new not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates a new malformed-configuration error.
    pub fn malformed(name: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Malformed {
            name: name.into(),
            source,
        }
    }
}
