//! Capabilities provided by the hosting UI framework.

use async_trait::async_trait;

use crate::error::Error;
use crate::error::HostError;

/// Location of the print stylesheet, relative to the host's static resources.
pub const PRINT_STYLESHEET: &str = "printStyle/print.css";

/// Label of the print trigger.
pub const SAVE_AS_PDF_LABEL: &str = "Save as PDF";

/// Notification severity. Tables only ever report failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    /// Operation failed.
    Error,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    pub variant: ToastVariant,
}

impl Toast {
    /// Builds the error notification for a failed operation.
    ///
    /// The title is the error's status text, or `"Error"` when there is
    /// none. The message is the first line of the error body's message,
    /// falling back to the error's own message when the body has none.
    pub fn from_error(error: &Error) -> Self {
        let message = match error.body_message().filter(|body| !body.is_empty()) {
            Some(body) => body.to_string(),
            None => error.to_string(),
        };

        Self {
            title: error
                .status_text()
                .filter(|s| !s.is_empty())
                .unwrap_or("Error")
                .to_string(),
            message: message.lines().next().unwrap_or_default().to_string(),
            variant: ToastVariant::Error,
        }
    }
}

/// Services the hosting framework offers to a table.
#[async_trait]
pub trait Host: Send + Sync {
    /// Loads a stylesheet into the page.
    async fn load_style(&self, url: &str) -> Result<(), HostError>;

    /// Runs the host's print command.
    fn exec_print_command(&self) -> Result<(), HostError>;

    /// Opens the generic print dialog. Used when the print command fails.
    fn window_print(&self);

    /// Displays a notification.
    fn show_toast(&self, toast: Toast);
}

/// A host that does nothing. Every capability succeeds silently.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

#[async_trait]
impl Host for NoopHost {
    async fn load_style(&self, _url: &str) -> Result<(), HostError> {
        Ok(())
    }

    fn exec_print_command(&self) -> Result<(), HostError> {
        Ok(())
    }

    fn window_print(&self) {}

    fn show_toast(&self, _toast: Toast) {}
}
