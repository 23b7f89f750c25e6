//! # Dashboard State
//!
//! Everything the front-end renders, in one owned struct. No I/O happens here;
//! the view-model mutates it in response to channel events and user actions.
//!
//! ```text
//! Dashboard
//! ├── view: View                   // focused panel
//! ├── transcript: Transcript       // chat history (append-only)
//! ├── logs: LogBuffer              // last 100 activity entries
//! ├── stream: StreamBuffer         // in-flight streaming reply
//! ├── status: StatusSnapshot       // cpu / ram / disk / battery
//! ├── settings: Settings           // backend + provider choice
//! ├── api_keys: ApiKeys            // key input fields, cleared on save
//! ├── input: String                // chat input field
//! ├── agent_active: bool
//! ├── welcome_shown: bool          // welcome notification de-dup
//! ├── screenshot_src / show_screenshot
//! └── toasts: Vec<Toast>           // transient notifications
//! ```

use std::time::{Duration, Instant};

use crate::core::logs::{LogBuffer, LogLevel};
use crate::core::status::StatusSnapshot;
use crate::core::stream::StreamBuffer;
use crate::core::transcript::{Role, Transcript};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

pub const DEFAULT_AGENT_BACKEND: &str = "open_interpreter";
pub const DEFAULT_LLM_PROVIDER: &str = "auto";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Chat,
    Terminal,
}

impl View {
    pub fn next(self) -> View {
        match self {
            View::Chat => View::Terminal,
            View::Terminal => View::Chat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub agent_backend: String,
    pub llm_provider: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            agent_backend: DEFAULT_AGENT_BACKEND.to_string(),
            llm_provider: DEFAULT_LLM_PROVIDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyProvider {
    Anthropic,
    OpenAi,
}

impl KeyProvider {
    pub fn parse(name: &str) -> Option<KeyProvider> {
        match name.to_ascii_lowercase().as_str() {
            "anthropic" => Some(KeyProvider::Anthropic),
            "openai" => Some(KeyProvider::OpenAi),
            _ => None,
        }
    }

    /// Wire name, as the server expects it.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyProvider::Anthropic => "anthropic",
            KeyProvider::OpenAi => "openai",
        }
    }

    /// Wire name with the first letter capitalized.
    pub fn title(self) -> &'static str {
        match self {
            KeyProvider::Anthropic => "Anthropic",
            KeyProvider::OpenAi => "Openai",
        }
    }
}

/// API key input fields. Never persisted, emptied once sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeys {
    pub anthropic: String,
    pub openai: String,
}

impl ApiKeys {
    pub fn field_mut(&mut self, provider: KeyProvider) -> &mut String {
        match provider {
            KeyProvider::Anthropic => &mut self.anthropic,
            KeyProvider::OpenAi => &mut self.openai,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub level: LogLevel,
    pub created: Instant,
}

pub struct Dashboard {
    pub view: View,
    pub transcript: Transcript,
    pub logs: LogBuffer,
    pub stream: StreamBuffer,
    pub status: StatusSnapshot,
    pub settings: Settings,
    pub api_keys: ApiKeys,
    pub input: String,
    pub agent_active: bool,
    pub welcome_shown: bool,
    pub screenshot_src: String,
    pub show_screenshot: bool,
    pub toasts: Vec<Toast>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Dashboard {
    pub fn new(settings: Settings) -> Self {
        Self {
            view: View::default(),
            transcript: Transcript::new(),
            logs: LogBuffer::new(),
            stream: StreamBuffer::new(),
            status: StatusSnapshot::default(),
            settings,
            api_keys: ApiKeys::default(),
            input: String::new(),
            agent_active: false,
            welcome_shown: false,
            screenshot_src: String::new(),
            show_screenshot: false,
            toasts: Vec::new(),
        }
    }

    pub fn log(&mut self, message: impl Into<String>, level: LogLevel) {
        self.logs.push(message, level);
    }

    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        self.transcript.push(role, content);
    }

    pub fn toast(&mut self, message: impl Into<String>, level: LogLevel) {
        self.toasts.push(Toast {
            message: message.into(),
            level,
            created: Instant::now(),
        });
    }

    /// Drop toasts older than [`TOAST_TTL`].
    pub fn prune_toasts(&mut self, now: Instant) {
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.created) < TOAST_TTL);
    }

    /// Route assistant content: buffer it while streaming, otherwise post it.
    pub fn deliver(&mut self, content: &str) {
        if !self.stream.push(content) {
            self.add_message(Role::Assistant, content);
        }
    }
}
