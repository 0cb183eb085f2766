use reqwest::StatusCode;
use thiserror::Error;

use crate::date::ParseError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Response contains unknown fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),
    #[error("No session token, authenticate first")]
    NotAuthenticated,
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Date(#[from] ParseError),
}

impl ClientError {
    /// HTTP status of the failed call, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(err) => err.status(),
            _ => None,
        }
    }
}
