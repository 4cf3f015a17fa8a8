//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: backend address, health indicators, status
//! - `Message`: one conversation message (plus `TypingIndicator`)
//! - `LandingPage`: welcome placeholder with the quick questions
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: question field with busy state
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props" (struct fields set by the
//! parent each frame), not by reaching into `App`:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! TitleBar::new(app.backend_url.clone(), app.storage_status, app.model_status, ...)
//!
//! // Bad: Hidden dependency on global state
//! TitleBar::from_app(&app)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── landing.rs       (Welcome placeholder)
//! ├── message.rs       (Single message + typing placeholder)
//! ├── message_list.rs  (Scrollable message container)
//! └── input_box/       (Question field)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub use input_box::{INPUT_HEIGHT, InputBox, InputEvent};
pub mod message;
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod landing;
pub use landing::LandingPage;
