use std::fmt;

use super::types::{Command, InboundEvent};

/// Errors a channel can report back to the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelError {
    /// The socket is down. Sends are dropped, never queued.
    NotConnected,
    /// No async runtime available to drive the connection.
    Runtime(String),
    /// The command could not be serialized.
    Encode(String),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::NotConnected => write!(f, "not connected"),
            ChannelError::Runtime(msg) => write!(f, "runtime error: {msg}"),
            ChannelError::Encode(msg) => write!(f, "encode error: {msg}"),
        }
    }
}

impl std::error::Error for ChannelError {}

/// The real-time link between the dashboard and the agent server.
///
/// Events are pulled with [`next_event`](Self::next_event) from the thread that
/// owns the view-model; outbound calls are fire-and-forget.
pub trait Channel {
    /// Returns the name of the channel (for logs).
    fn name(&self) -> &str;

    /// Starts connecting. Calling it again once started is a no-op.
    fn connect(&mut self) -> Result<(), ChannelError>;

    fn is_connected(&self) -> bool;

    /// Next delivered event, if one is waiting. Never blocks.
    fn next_event(&mut self) -> Option<InboundEvent>;

    fn send(&mut self, command: Command) -> Result<(), ChannelError>;

    fn run_tool(&mut self, tool: &str) -> Result<(), ChannelError> {
        self.send(Command::Tool {
            tool: tool.to_string(),
        })
    }

    fn chat(&mut self, message: &str) -> Result<(), ChannelError> {
        self.send(Command::Chat {
            message: message.to_string(),
        })
    }

    fn toggle_agent(&mut self, active: bool) -> Result<(), ChannelError> {
        self.send(Command::ToggleAgent { active })
    }

    fn save_settings(&mut self, agent_backend: &str, llm_provider: &str) -> Result<(), ChannelError> {
        self.send(Command::Settings {
            agent_backend: agent_backend.to_string(),
            llm_provider: llm_provider.to_string(),
        })
    }

    fn save_api_key(&mut self, provider: &str, key: &str) -> Result<(), ChannelError> {
        self.send(Command::SaveApiKey {
            provider: provider.to_string(),
            key: key.to_string(),
        })
    }

    fn navigate(&mut self, path: &str) -> Result<(), ChannelError> {
        self.send(Command::Navigate {
            path: path.to_string(),
        })
    }
}
