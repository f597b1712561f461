//! Error types for the core library

use thiserror::Error;

use crate::task::TaskId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Another operation is already pending for task {0}")]
    OperationPending(TaskId),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a Server error from a status code and response body.
    ///
    /// An empty body falls back to the canonical reason phrase.
    pub fn server(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        } else {
            body
        };
        Self::Server {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_server_error_keeps_body() {
        let err = Error::server(StatusCode::BAD_REQUEST, "title is required");
        match &err {
            Error::Server { status, message } => {
                assert_eq!(*status, 400);
                assert_eq!(message, "title is required");
            }
            e => panic!("Expected Server error, got: {:?}", e),
        }
        assert_eq!(err.to_string(), "Server error (400): title is required");
    }

    #[test]
    fn test_server_error_empty_body_uses_reason() {
        let err = Error::server(StatusCode::INTERNAL_SERVER_ERROR, "  ");
        match err {
            Error::Server { message, .. } => assert_eq!(message, "Internal Server Error"),
            e => panic!("Expected Server error, got: {:?}", e),
        }
    }
}
