//! Record fetch errors

/// Errors returned by a [`RecordSource`](crate::query::RecordSource).
///
/// Fetches are never retried; the error is handed back to the caller so it
/// can be reported to the user.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// The remote service rejected or failed the query.
    #[error("{message}")]
    Remote {
        /// Status text of the failed response (e.g. "Internal Server Error").
        status_text: Option<String>,
        /// Top-level error message.
        message: String,
        /// Message from the structured error body, if one was returned.
        body_message: Option<String>,
    },

    /// The response could not be decoded into records.
    #[error("Response decode error: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },
}

impl FetchError {
    /// Creates a remote error with just a message.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            status_text: None,
            message: message.into(),
            body_message: None,
        }
    }

    /// Creates a remote error with a status text and structured body message.
    pub fn remote_with_body(
        status_text: impl Into<String>,
        message: impl Into<String>,
        body_message: impl Into<String>,
    ) -> Self {
        Self::Remote {
            status_text: Some(status_text.into()),
            message: message.into(),
            body_message: Some(body_message.into()),
        }
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns the status text if the remote service provided one.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            Self::Remote { status_text, .. } => status_text.as_deref(),
            _ => None,
        }
    }

    /// Returns the structured body message if the remote service provided one.
    pub fn body_message(&self) -> Option<&str> {
        match self {
            Self::Remote { body_message, .. } => body_message.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
