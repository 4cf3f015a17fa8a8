//! # Conversation Log
//!
//! The ordered, append-only record of what the user sees:
//!
//! ```text
//! Conversation
//! ├── Welcome              // one-time onboarding, removed on first question
//! ├── Message(user)        // literal text
//! ├── Message(assistant)   // markdown + optional metadata line
//! └── Typing(token)        // content-less placeholder while a request is pending
//! ```
//!
//! Messages are immutable once appended. Typing placeholders are the only
//! entries that are ever removed, and only by their own token.

use uuid::Uuid;

use crate::backend::AskResponse;
use crate::core::intent::Intent;

/// Shown when the request could not complete. Never carries technical detail.
pub const TRANSPORT_FAILURE_TEXT: &str = "Bir hata olustu. Lutfen tekrar deneyin.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Structured answer details reported by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageMeta {
    pub intent: Option<Intent>,
    pub query_executed: bool,
    pub row_count: Option<u64>,
}

impl MessageMeta {
    pub fn from_response(resp: &AskResponse) -> Self {
        Self {
            intent: resp
                .intent
                .as_deref()
                .filter(|id| !id.is_empty())
                .map(Intent::from_id),
            query_executed: resp.query_executed.unwrap_or(false),
            row_count: resp.row_count,
        }
    }
}

/// What the metadata line under an assistant message shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaLine {
    pub intent_badge: Option<String>,
    pub row_count: Option<u64>,
}

impl MetaLine {
    pub fn row_annotation(&self) -> Option<String> {
        self.row_count.map(|n| format!("{n} kayit"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub content: String,
    pub role: Role,
    pub is_error: bool,
    pub meta: Option<MessageMeta>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::User,
            is_error: false,
            meta: None,
        }
    }

    pub fn assistant(content: impl Into<String>, meta: MessageMeta) -> Self {
        Self {
            content: content.into(),
            role: Role::Assistant,
            is_error: false,
            meta: Some(meta),
        }
    }

    /// Error messages never carry metadata.
    pub fn assistant_error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::Assistant,
            is_error: true,
            meta: None,
        }
    }

    /// Classifies a structured backend response into the message to append.
    pub fn from_response(resp: &AskResponse) -> Self {
        if resp.is_app_error() {
            return Self::assistant_error(resp.error_text());
        }
        Self::assistant(
            resp.answer.clone().unwrap_or_default(),
            MessageMeta::from_response(resp),
        )
    }

    pub fn transport_failure() -> Self {
        Self::assistant_error(TRANSPORT_FAILURE_TEXT)
    }

    /// The metadata line to render, if any.
    ///
    /// None for user messages, error messages, and assistant messages whose
    /// metadata has nothing to show. The intent badge is suppressed for the
    /// default intent; the row count needs both `query_executed` and a count.
    pub fn meta_line(&self) -> Option<MetaLine> {
        if self.role != Role::Assistant || self.is_error {
            return None;
        }
        let meta = self.meta.as_ref()?;

        let intent_badge = meta
            .intent
            .as_ref()
            .filter(|i| !i.is_default())
            .map(|i| i.label().to_string());
        let row_count = if meta.query_executed {
            meta.row_count
        } else {
            None
        };

        if intent_badge.is_none() && row_count.is_none() {
            return None;
        }
        Some(MetaLine {
            intent_badge,
            row_count,
        })
    }
}

/// Opaque identity of a typing placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypingToken(Uuid);

impl TypingToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TypingToken {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Welcome,
    Message(Message),
    Typing(TypingToken),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    entries: Vec<Entry>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// A fresh conversation showing the welcome placeholder.
    pub fn new() -> Self {
        Self {
            entries: vec![Entry::Welcome],
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Message(m) => Some(m),
            _ => None,
        })
    }

    pub fn has_welcome(&self) -> bool {
        self.entries.iter().any(|e| matches!(e, Entry::Welcome))
    }

    pub fn typing_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Typing(_)))
            .count()
    }

    /// Removes the welcome placeholder. Returns whether one was present.
    pub fn dismiss_welcome(&mut self) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !matches!(e, Entry::Welcome));
        self.entries.len() != before
    }

    pub fn push_message(&mut self, message: Message) {
        self.entries.push(Entry::Message(message));
    }

    pub fn push_typing(&mut self, token: TypingToken) {
        self.entries.push(Entry::Typing(token));
    }

    /// Removes the placeholder with this token. Unknown or already-removed
    /// tokens are a no-op. Returns whether anything was removed.
    pub fn remove_typing(&mut self, token: TypingToken) -> bool {
        match self
            .entries
            .iter()
            .position(|e| matches!(e, Entry::Typing(t) if *t == token))
        {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }
}
