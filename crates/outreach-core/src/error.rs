//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend request failed.
    #[error(transparent)]
    Api(#[from] outreach_client::Error),

    /// A client-side precondition failed; no request was issued.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Client-side precondition failures, reported before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The campaign subject is blank.
    #[error("please fill in a subject")]
    MissingSubject,

    /// The campaign body is blank.
    #[error("please fill in a message")]
    MissingBody,

    /// Target mode is "selected" but nobody is selected.
    #[error("please select at least one person")]
    EmptySelection,

    /// A template is missing one of its required fields.
    #[error("template name, subject and content are required")]
    IncompleteTemplate,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
