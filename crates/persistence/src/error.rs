// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Longest response body excerpt carried in an error.
const BODY_EXCERPT_LEN: usize = 200;

/// Errors that can occur talking to the remote store or auth service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The remote service answered with a non-success status.
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    /// A response or row could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
    /// The requested row was not found.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The query cannot be expressed or evaluated.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// Credentials or access token were rejected.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),
    /// A general error occurred.
    #[error("{0}")]
    Other(String),
}

impl PersistenceError {
    /// Builds an `UnexpectedStatus` error, truncating the body.
    #[must_use]
    pub fn unexpected_status(status: u16, body: &str) -> Self {
        Self::UnexpectedStatus {
            status,
            body: body.chars().take(BODY_EXCERPT_LEN).collect(),
        }
    }
}

impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
