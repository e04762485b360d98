//! Planning service error types

use thiserror::Error;

/// Fixed fallback when no better message is available
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to plan vacation. Please try again.";

/// Errors produced by the planning client
#[derive(Debug, Error)]
pub enum PlanError {
    /// Non-2xx response; `message` is the server's `error` field when the
    /// body carried one
    #[error("API error {status}: {message:?}")]
    Api { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl PlanError {
    /// Normalize this error into the single user-facing display string
    ///
    /// Server-supplied message first, then the transport error text, then
    /// the fixed fallback. Nothing escapes this boundary un-normalized.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api {
                message: Some(message), ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Api { .. } => DEFAULT_FAILURE_MESSAGE.to_string(),
            Self::Network(e) => e.to_string(),
            Self::InvalidResponse(_) => DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }

    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidResponse(_) => None,
        }
    }
}
