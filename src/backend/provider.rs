use std::fmt;

use async_trait::async_trait;

use super::types::{AskResponse, HealthResponse};

/// Errors that prevent a backend exchange from completing.
///
/// Every variant is a *transport* failure from the controller's point of view.
/// A backend that answers with a well-formed `{"error": ...}` body is not an
/// error here; that arrives as `Ok(AskResponse)` and is classified later.
#[derive(Debug)]
pub enum BackendError {
    /// Backend misconfigured (unusable base URL).
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// Non-success status with a body that is not the expected JSON.
    Api { status: u16, message: String },
    /// Success status but the body could not be decoded.
    Parse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[async_trait]
pub trait QuestionBackend: Send + Sync {
    /// Short identity of the backend implementation, for logs.
    fn name(&self) -> &str;

    /// Submits one question and returns the decoded answer envelope.
    async fn ask(&self, question: &str) -> Result<AskResponse, BackendError>;

    /// Queries subsystem health.
    async fn health(&self) -> Result<HealthResponse, BackendError>;
}
