//! Host capability errors

/// Error reported by a [`Host`](crate::host::Host) capability.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct HostError {
    /// Description of the failure.
    pub message: String,
}

impl HostError {
    /// Creates a new host error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
