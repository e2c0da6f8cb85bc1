//! Error types for CRM calls and workflow actions
//!
//! Every failure is classified as either a transport failure (the HTTP call
//! itself failed, the response body is kept for diagnosis) or anything else.

use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    #[error("{resource} not found")]
    NotFound { resource: String, body: String },
    #[error("HubSpot rejected the credentials (HTTP {status})")]
    Unauthorized { status: u16, body: String },
    #[error("HTTP request failed with status {status}")]
    Http { status: u16, body: String },
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Missing required input field `{0}`")]
    MissingInput(String),
    #[error("Invalid workflow event: {0}")]
    InvalidEvent(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Unexpected response shape from {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type CrmResult<T> = Result<T, CrmError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Other,
}

impl CrmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. }
            | Self::Unauthorized { .. }
            | Self::Http { .. }
            | Self::Request(_) => ErrorKind::Transport,
            Self::MissingInput(_)
            | Self::InvalidEvent(_)
            | Self::Config(_)
            | Self::Decode { .. } => ErrorKind::Other,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Unauthorized { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Response body of a failed HTTP call, if the server sent one.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::NotFound { body, .. }
            | Self::Unauthorized { body, .. }
            | Self::Http { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Map a non-success HTTP status onto the matching variant.
    pub fn from_status(status: u16, resource: &str, body: String) -> Self {
        match status {
            404 => Self::NotFound {
                resource: resource.to_string(),
                body,
            },
            401 | 403 => Self::Unauthorized { status, body },
            _ => Self::Http { status, body },
        }
    }
}

/// Log a failed action. Transport failures log the response body, anything
/// else logs the raw error.
pub fn log_failure(action: &str, err: &CrmError) {
    match err.kind() {
        ErrorKind::Transport => {
            let body = err.response_body().map(pretty_body).unwrap_or_default();
            error!(
                action,
                status = err.status(),
                response = %body,
                "{} failed: {}", action, err
            );
        }
        ErrorKind::Other => {
            error!(action, error = ?err, "{} failed: {}", action, err);
        }
    }
}

fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}
