//! # Status Probe
//!
//! One-shot health query at startup. Each indicator is set independently;
//! a failed probe leaves both indicators untouched and is never retried.

use log::{debug, info};

use crate::backend::{HealthResponse, QuestionBackend};
use crate::core::surface::{IndicatorState, StatusIndicator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub storage_connected: bool,
    pub model_configured: bool,
}

impl From<&HealthResponse> for HealthStatus {
    fn from(resp: &HealthResponse) -> Self {
        Self {
            storage_connected: resp.database_connected(),
            model_configured: resp.llm_configured(),
        }
    }
}

/// Queries backend health and reflects it on the two indicators.
///
/// Returns the status on success, None when the probe failed.
pub async fn check_health(
    backend: &dyn QuestionBackend,
    storage: &mut impl StatusIndicator,
    model: &mut impl StatusIndicator,
) -> Option<HealthStatus> {
    match backend.health().await {
        Ok(resp) => {
            let status = HealthStatus::from(&resp);
            info!(
                "Health: storage_connected={}, model_configured={}",
                status.storage_connected, status.model_configured
            );
            storage.set_state(IndicatorState::from_flag(status.storage_connected));
            model.set_state(IndicatorState::from_flag(status.model_configured));
            Some(status)
        }
        Err(e) => {
            debug!("Health probe failed, indicators left unset: {}", e);
            None
        }
    }
}
