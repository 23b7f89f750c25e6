//! # TUI Components
//!
//! All UI components for the terminal dashboard.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields, built fresh each frame:
//! - `StatusBar`: connection, agent mode, view tabs and system snapshot
//! - `Message`: one chat bubble (also the live streaming bubble)
//! - `LogPanel`: the activity log
//! - `Toasts`, `ScreenshotPopup`: overlays
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state across frames and react to `TuiEvent`s:
//! - `InputBox`: the text being typed and its cursor
//! - `TranscriptState`: scroll position behind `TranscriptView`
//!
//! Components read dashboard state through props and never mutate it; the
//! event loop turns what they emit into core actions.
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── status_bar.rs       (top line)
//! ├── message.rs          (single bubble)
//! ├── transcript_view.rs  (scrollable chat history)
//! ├── log_panel.rs        (terminal view)
//! ├── input_box.rs        (single-line input)
//! ├── toasts.rs           (top-right notifications)
//! └── screenshot.rs       (screenshot popup)
//! ```

pub mod input_box;
pub mod log_panel;
pub mod message;
pub mod screenshot;
pub mod status_bar;
pub mod toasts;
pub mod transcript_view;

pub use input_box::{InputBox, InputEvent};
pub use log_panel::LogPanel;
pub use screenshot::ScreenshotPopup;
pub use status_bar::StatusBar;
pub use toasts::Toasts;
pub use transcript_view::{TranscriptState, TranscriptView};
