//! Table option validation errors

/// Errors raised when constructing [`TableOptions`](crate::table::TableOptions).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// The custom setting name was empty.
    #[error("Custom setting name is required")]
    EmptySettingName,

    /// The page size was zero.
    #[error("Page size must be greater than zero")]
    ZeroPageSize,
}
