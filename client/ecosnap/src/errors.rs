//! Application-wide error types.

use ecosnap_core::{FieldError, FileRejection, FormError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-2xx response; `message` is the backend's own text when it sent one.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Client-side form validation failed; nothing was sent.
    #[error("{}", first_message(.0))]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Rejected(#[from] FileRejection),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("An upload is already in progress")]
    SubmissionInFlight,
}

fn first_message(errors: &[FieldError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("Invalid input")
}

pub type Result<T> = std::result::Result<T, ClientError>;
