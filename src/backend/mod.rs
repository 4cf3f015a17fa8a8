pub mod http;
pub mod provider;
pub mod types;

pub use http::HttpBackend;
pub use provider::{BackendError, QuestionBackend};
pub use types::{AskRequest, AskResponse, HealthResponse};
