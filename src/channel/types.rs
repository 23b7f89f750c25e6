use serde::{Deserialize, Deserializer, Serialize};

/// Named inbound events the dashboard reacts to.
///
/// `Connected` and `Disconnected` never appear on the wire; the transport
/// synthesizes them from socket state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Connected,
    Disconnected,
    Message,
    Notification,
    Status,
    Screenshot,
    Code,
    Error,
    StreamStart,
    StreamEnd,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::Connected,
        EventKind::Disconnected,
        EventKind::Message,
        EventKind::Notification,
        EventKind::Status,
        EventKind::Screenshot,
        EventKind::Code,
        EventKind::Error,
        EventKind::StreamStart,
        EventKind::StreamEnd,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Connected => "connected",
            EventKind::Disconnected => "disconnected",
            EventKind::Message => "message",
            EventKind::Notification => "notification",
            EventKind::Status => "status",
            EventKind::Screenshot => "screenshot",
            EventKind::Code => "code",
            EventKind::Error => "error",
            EventKind::StreamStart => "stream_start",
            EventKind::StreamEnd => "stream_end",
        }
    }
}

/// Optional fields carried by an inbound event.
///
/// Absent fields stay `None`; handlers read them through [`content`](Self::content)
/// and [`image`](Self::image), which default to the empty string.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EventPayload {
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<String>,
}

impl EventPayload {
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    pub fn image(&self) -> &str {
        self.image.as_deref().unwrap_or("")
    }
}

/// Accepts a string, `null`, or any other JSON value (rendered as JSON text).
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// One event pushed by the server, e.g. `{"type": "message", "content": "hi"}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct InboundEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl InboundEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            payload: EventPayload::default(),
        }
    }

    pub fn with_content(kind: EventKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            payload: EventPayload {
                content: Some(content.into()),
                image: None,
            },
        }
    }
}

/// Outbound request frames, tagged by `action` the way the server dispatches them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    Tool {
        tool: String,
    },
    Chat {
        message: String,
    },
    ToggleAgent {
        active: bool,
    },
    Settings {
        agent_backend: String,
        llm_provider: String,
    },
    SaveApiKey {
        provider: String,
        key: String,
    },
    Navigate {
        path: String,
    },
}

impl Command {
    /// One-line description for logs. Never includes secrets.
    pub fn summary(&self) -> String {
        match self {
            Command::Tool { tool } => format!("tool({tool})"),
            Command::Chat { message } => format!("chat({} chars)", message.chars().count()),
            Command::ToggleAgent { active } => format!("toggle_agent({active})"),
            Command::Settings {
                agent_backend,
                llm_provider,
            } => format!("settings({agent_backend}, {llm_provider})"),
            Command::SaveApiKey { provider, .. } => format!("save_api_key({provider}, <redacted>)"),
            Command::Navigate { path } => format!("navigate({path})"),
        }
    }
}
