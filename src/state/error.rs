//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// No interactive element is focused
    #[error("Nothing is focused")]
    NothingFocused,

    /// A confirmation answer arrived while none was asked for
    #[error("No confirmation is pending")]
    ConfirmationNotPending,

    /// Page input arrived while a confirmation is open
    #[error("A confirmation is pending")]
    ConfirmationPending,
}
