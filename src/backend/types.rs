use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/ask`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

/// Body returned by `POST /api/ask`.
///
/// Every field is optional: absence means "not provided", never malformed.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub query_executed: Option<bool>,
    #[serde(default)]
    pub row_count: Option<u64>,
}

impl AskResponse {
    /// True when the backend reported a semantic failure.
    /// An empty `error` string does not count.
    pub fn is_app_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }

    /// Text to show for an application-level error: `answer` when it has
    /// content, otherwise `error`.
    pub fn error_text(&self) -> String {
        non_empty(self.answer.as_deref())
            .or_else(|| non_empty(self.error.as_deref()))
            .unwrap_or_default()
            .to_string()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Body returned by `GET /api/health`.
///
/// Fields are kept as raw JSON values so a non-string status degrades to
/// "not the expected value" instead of failing the whole probe.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub database: Option<Value>,
    #[serde(default)]
    pub llm: Option<Value>,
}

impl HealthResponse {
    pub fn database_connected(&self) -> bool {
        self.database.as_ref().and_then(Value::as_str) == Some("connected")
    }

    pub fn llm_configured(&self) -> bool {
        self.llm.as_ref().and_then(Value::as_str) == Some("configured")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_request_serializes_question_only() {
        let body = serde_json::to_string(&AskRequest { question: "hello" }).unwrap();
        assert_eq!(body, r#"{"question":"hello"}"#);
    }

    #[test]
    fn ask_response_tolerates_missing_fields() {
        let resp: AskResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp, AskResponse::default());
        assert!(!resp.is_app_error());
    }

    #[test]
    fn ask_response_full_body() {
        let resp: AskResponse = serde_json::from_str(
            r#"{"answer":"ok","intent":"concurrent_requests","query_executed":true,"row_count":12}"#,
        )
        .unwrap();
        assert_eq!(resp.answer.as_deref(), Some("ok"));
        assert_eq!(resp.intent.as_deref(), Some("concurrent_requests"));
        assert_eq!(resp.query_executed, Some(true));
        assert_eq!(resp.row_count, Some(12));
    }

    #[test]
    fn empty_error_string_is_not_an_app_error() {
        let resp = AskResponse {
            answer: Some("fine".into()),
            error: Some(String::new()),
            ..Default::default()
        };
        assert!(!resp.is_app_error());
    }

    #[test]
    fn error_text_prefers_answer() {
        let resp = AskResponse {
            answer: Some("Sorunuz islenemedi".into()),
            error: Some("boom".into()),
            ..Default::default()
        };
        assert_eq!(resp.error_text(), "Sorunuz islenemedi");
    }

    #[test]
    fn error_text_falls_back_to_error() {
        let resp = AskResponse {
            error: Some("unparsed".into()),
            ..Default::default()
        };
        assert_eq!(resp.error_text(), "unparsed");

        let resp = AskResponse {
            answer: Some(String::new()),
            error: Some("unparsed".into()),
            ..Default::default()
        };
        assert_eq!(resp.error_text(), "unparsed");
    }

    #[test]
    fn health_flags() {
        let resp: HealthResponse =
            serde_json::from_str(r#"{"database":"connected","llm":"not configured"}"#).unwrap();
        assert!(resp.database_connected());
        assert!(!resp.llm_configured());
    }

    #[test]
    fn health_non_string_values_are_not_connected() {
        let resp: HealthResponse =
            serde_json::from_str(r#"{"database":true,"llm":null}"#).unwrap();
        assert!(!resp.database_connected());
        assert!(!resp.llm_configured());
    }
}
