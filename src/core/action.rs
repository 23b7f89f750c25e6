//! # Actions
//!
//! Everything the user can do becomes an `Action`.
//! User presses Enter? That's `Action::SendMessage`.
//! User hits F3? That's `Action::RunTool("screenshot")`.
//!
//! `update()` applies the local half of the action to the dashboard and
//! returns the `Effect` describing what should go out on the channel. No I/O
//! here; the view-model executes the effect.
//!
//! ```text
//! Dashboard + Action  →  update()  →  Dashboard' + Effect
//! ```

use crate::core::logs::LogLevel;
use crate::core::state::{Dashboard, KeyProvider, View};
use crate::core::transcript::Role;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send whatever is in the input field.
    SendMessage,
    RunTool(String),
    /// Flip agent mode and tell the server.
    ToggleAgent,
    SaveSettings,
    /// Send the key typed into this provider's field.
    SaveApiKey(KeyProvider),
    DismissScreenshot,
    SwitchView(View),
    /// Ask the server for a directory listing.
    Browse(String),
}

/// Outbound work requested by a handler or an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    RunTool(String),
    Chat(String),
    ToggleAgent(bool),
    SaveSettings {
        agent_backend: String,
        llm_provider: String,
    },
    SaveApiKey {
        provider: KeyProvider,
        key: String,
    },
    Navigate(String),
}

pub fn update(dashboard: &mut Dashboard, action: Action) -> Effect {
    match action {
        Action::SendMessage => {
            let text = dashboard.input.trim().to_string();
            if text.is_empty() {
                return Effect::None;
            }
            dashboard.add_message(Role::User, text.clone());
            dashboard.input.clear();
            dashboard.stream.start();
            dashboard.log(format!("You: {text}"), LogLevel::Info);
            Effect::Chat(text)
        }
        Action::RunTool(tool) => {
            dashboard.log(format!("Running tool: {tool}"), LogLevel::Info);
            Effect::RunTool(tool)
        }
        Action::ToggleAgent => {
            dashboard.agent_active = !dashboard.agent_active;
            let label = if dashboard.agent_active { "ON" } else { "OFF" };
            dashboard.log(format!("Switched Agent Mode: {label}"), LogLevel::Info);
            Effect::ToggleAgent(dashboard.agent_active)
        }
        Action::SaveSettings => {
            dashboard.log("Settings updated", LogLevel::Info);
            dashboard.toast("Settings saved", LogLevel::Success);
            Effect::SaveSettings {
                agent_backend: dashboard.settings.agent_backend.clone(),
                llm_provider: dashboard.settings.llm_provider.clone(),
            }
        }
        Action::SaveApiKey(provider) => {
            let key = std::mem::take(dashboard.api_keys.field_mut(provider));
            if key.is_empty() {
                dashboard.toast("Please enter an API key", LogLevel::Error);
                return Effect::None;
            }
            dashboard.log(format!("Saved {} API key", provider.as_str()), LogLevel::Success);
            dashboard.toast(format!("{} API key saved!", provider.title()), LogLevel::Success);
            Effect::SaveApiKey { provider, key }
        }
        Action::DismissScreenshot => {
            dashboard.show_screenshot = false;
            dashboard.screenshot_src.clear();
            Effect::None
        }
        Action::SwitchView(view) => {
            dashboard.view = view;
            Effect::None
        }
        Action::Browse(path) => {
            let path = path.trim().to_string();
            dashboard.log(format!("Browsing: {path}"), LogLevel::Info);
            Effect::Navigate(path)
        }
    }
}
