//! # Application State
//!
//! Core business state for Diagora. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── conversation: Conversation     // welcome, messages, typing placeholders
//! ├── input_enabled: bool            // false while a question is in flight
//! ├── storage_status: IndicatorState // data-store connectivity
//! ├── model_status: IndicatorState   // language-model configuration
//! ├── status_message: String         // title bar text
//! ├── backend_url: String            // where questions go
//! ├── quick_questions: Vec<String>   // F1..F9 shortcuts
//! └── render_markdown: bool          // assistant text as markdown or literal
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::conversation::Conversation;
use crate::core::surface::IndicatorState;

/// Which of the two health indicators an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Storage,
    Model,
}

pub struct App {
    pub conversation: Conversation,
    pub input_enabled: bool,
    pub storage_status: IndicatorState,
    pub model_status: IndicatorState,
    pub status_message: String,
    pub backend_url: String,
    pub quick_questions: Vec<String>,
    pub render_markdown: bool,
}

impl App {
    pub fn new(backend_url: String, quick_questions: Vec<String>) -> Self {
        Self {
            conversation: Conversation::new(),
            input_enabled: true,
            storage_status: IndicatorState::Unset,
            model_status: IndicatorState::Unset,
            status_message: String::from("Hazir"),
            backend_url,
            quick_questions,
            render_markdown: true,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(config.base_url.clone(), config.quick_questions.clone());
        app.render_markdown = config.render_markdown;
        app
    }

    pub fn indicator(&self, which: Indicator) -> IndicatorState {
        match which {
            Indicator::Storage => self.storage_status,
            Indicator::Model => self.model_status,
        }
    }

    pub fn indicator_mut(&mut self, which: Indicator) -> &mut IndicatorState {
        match which {
            Indicator::Storage => &mut self.storage_status,
            Indicator::Model => &mut self.model_status,
        }
    }

    /// Whether anything is still waiting on the backend.
    pub fn is_busy(&self) -> bool {
        !self.input_enabled || self.conversation.typing_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CliOverrides, DiagoraConfig, resolve};

    #[test]
    fn test_app_new_defaults() {
        let app = App::new("http://localhost:5000".into(), vec![]);
        assert!(app.input_enabled);
        assert!(app.conversation.has_welcome());
        assert_eq!(app.storage_status, IndicatorState::Unset);
        assert_eq!(app.model_status, IndicatorState::Unset);
        assert!(!app.is_busy());
    }

    #[test]
    fn test_from_config_copies_settings() {
        let cli = CliOverrides {
            base_url: Some("http://ebs:8080".into()),
            plain: true,
            ..Default::default()
        };
        let config = resolve(&DiagoraConfig::default(), &cli);
        let app = App::from_config(&config);
        assert_eq!(app.backend_url, "http://ebs:8080");
        assert!(!app.render_markdown);
        assert_eq!(app.quick_questions, config.quick_questions);
    }

    #[test]
    fn test_indicator_mut_targets_one_indicator() {
        let mut app = App::new(String::new(), vec![]);
        *app.indicator_mut(Indicator::Model) = IndicatorState::Warning;
        assert_eq!(app.indicator(Indicator::Model), IndicatorState::Warning);
        assert_eq!(app.indicator(Indicator::Storage), IndicatorState::Unset);
    }
}
