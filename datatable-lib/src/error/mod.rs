//! Error types

mod config;
mod fetch;
mod host;
mod options;
mod settings;

pub use config::*;
pub use fetch::*;
pub use host::*;
pub use options::*;
pub use settings::*;

/// Top-level error for table operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The table configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Records could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The table options were rejected.
    #[error(transparent)]
    Options(#[from] OptionsError),
}

impl Error {
    /// Returns the status text reported by the remote service, if any.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            Self::Fetch(e) => e.status_text(),
            _ => None,
        }
    }

    /// Returns the message carried in the remote error body, if any.
    pub fn body_message(&self) -> Option<&str> {
        match self {
            Self::Fetch(e) => e.body_message(),
            _ => None,
        }
    }
}
