//! Error types for form validation, dispatch and submission

use thiserror::Error;

/// Minimum number of characters accepted for a new password
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Local validation failures. These never reach the dashboard API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter at least {min} characters for your password")]
    TooShort { min: usize },
    #[error("The passwords are not matching")]
    Mismatch,
    #[error("Please enter a name for your project")]
    Empty,
}

/// Failures reported by an action dispatcher
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request never produced a response (connection, timeout, decoding)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The dispatcher refused the action without a status code
    #[error("{0}")]
    Rejected(String),
}

/// Reasons a submission was refused or did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("A request is already in progress")]
    InFlight,
    #[error("The form was already submitted")]
    Completed,
    /// A prerequisite of the action is missing
    #[error("{0}")]
    Unavailable(&'static str),
    #[error("{0}")]
    Failed(String),
}
