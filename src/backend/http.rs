//! HTTP client for the Diagora backend.
//!
//! Two endpoints, both JSON:
//! - `POST {base}/api/ask` with `{"question": ...}`
//! - `GET {base}/api/health`
//!
//! The backend answers failed questions with a JSON body and a 400/500
//! status. Those bodies are decoded and returned as `Ok` so the controller can
//! show the backend's own explanation; only bodies that are not the expected
//! JSON become `BackendError`.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::backend::{AskRequest, AskResponse, BackendError, HealthResponse, QuestionBackend};

const ASK_PATH: &str = "/api/ask";
const HEALTH_PATH: &str = "/api/health";
const BACKEND_NAME: &str = "diagora-http";

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<reqwest::Url, BackendError> {
        let raw = format!("{}{}", self.base_url, path);
        reqwest::Url::parse(&raw).map_err(|e| BackendError::Config(format!("{raw}: {e}")))
    }
}

/// Reads the body and decodes it as `T`, honoring JSON bodies on error statuses.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| BackendError::Network(e.to_string()))?;

    match serde_json::from_str::<T>(&body) {
        Ok(value) => {
            if !status.is_success() {
                warn!("Backend returned HTTP {} with a JSON body", status.as_u16());
            }
            Ok(value)
        }
        Err(e) if status.is_success() => Err(BackendError::Parse(e.to_string())),
        Err(_) => Err(BackendError::Api {
            status: status.as_u16(),
            message: body,
        }),
    }
}

#[async_trait]
impl QuestionBackend for HttpBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    async fn ask(&self, question: &str) -> Result<AskResponse, BackendError> {
        let url = self.url(ASK_PATH)?;
        info!("POST {} (question_len={})", url, question.len());

        let response = self
            .client
            .post(url)
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        debug!("Ask response status: {}", response.status());
        decode(response).await
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        let url = self.url(HEALTH_PATH)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        // Any JSON body counts as a report; a non-object one reports nothing
        let body: Value = decode(response).await?;
        Ok(serde_json::from_value(body).unwrap_or_else(|e| {
            debug!("Health body is not an object, treating fields as absent: {}", e);
            HealthResponse::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:5000/");
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(
            backend.url(ASK_PATH).unwrap().as_str(),
            "http://localhost:5000/api/ask"
        );
    }

    #[test]
    fn name_is_fixed_identity() {
        let backend = HttpBackend::new("http://localhost:5000");
        assert_eq!(backend.name(), "diagora-http");
    }

    #[test]
    fn unusable_base_url_is_config_error() {
        let backend = HttpBackend::new("not a url");
        assert!(matches!(backend.url(HEALTH_PATH), Err(BackendError::Config(_))));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let backend = HttpBackend::new("http://127.0.0.1:9");
        let result = backend.ask("hello").await;
        assert!(matches!(result, Err(BackendError::Network(_))));
    }
}
