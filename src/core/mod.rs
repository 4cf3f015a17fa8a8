//! # Core Application Logic
//!
//! This module contains Diagora's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Controller (asking)  │
//!                    │  • Conversation (log)   │
//!                    │  • State + update()     │
//!                    └───────────┬─────────────┘
//!                                │ MessageSink / InputControl / StatusIndicator
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Recording │      │  Backend   │
//!     │  Adapter   │      │  surface   │      │  (reqwest) │
//!     │ (ratatui)  │      │  (tests)   │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`controller`]: turns a question into conversation entries
//! - [`conversation`]: the message log and typing placeholders
//! - [`health`]: one-shot backend health probe
//! - [`intent`]: backend intent ids and their display labels
//! - [`surface`]: capability traits a host surface implements
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod controller;
pub mod conversation;
pub mod health;
pub mod intent;
pub mod state;
pub mod surface;
