//! Slash commands typed into the input box.
//!
//! Anything not starting with `/` is chat. The terminal has no settings form
//! or key fields, so these commands fill them in and fire the same actions a
//! form's buttons would.

use crate::core::state::KeyProvider;

/// One log line per command, listed in the terminal view by `/help`.
pub const HELP_LINES: &[&str] = &[
    "/tool <name>                    run a tool (F2 status, F3 screenshot, F4 fetch, F5 panic)",
    "/settings <backend> <provider>  save agent backend and LLM provider",
    "/key <anthropic|openai> <key>   save an API key",
    "/browse <path>                  open a path on the host",
    "/agent                          toggle agent mode (Ctrl+A)",
    "Tab switches chat/terminal · Esc closes the screenshot or quits",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Chat(String),
    Tool(String),
    Settings {
        agent_backend: String,
        llm_provider: String,
    },
    ApiKey {
        provider: KeyProvider,
        key: String,
    },
    Browse(String),
    ToggleAgent,
    Help,
    /// Malformed command, with the usage hint to show.
    Invalid(String),
}

pub fn parse(text: &str) -> Input {
    let trimmed = text.trim();
    let Some(command_line) = trimmed.strip_prefix('/') else {
        return Input::Chat(text.to_string());
    };

    let (name, rest) = match command_line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command_line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match name {
        "tool" => match args.as_slice() {
            [tool] => Input::Tool((*tool).to_string()),
            _ => Input::Invalid("Usage: /tool <name>".into()),
        },
        "settings" => match args.as_slice() {
            [backend, provider] => Input::Settings {
                agent_backend: (*backend).to_string(),
                llm_provider: (*provider).to_string(),
            },
            _ => Input::Invalid("Usage: /settings <backend> <provider>".into()),
        },
        "key" => match args.as_slice() {
            [provider, key] => match KeyProvider::parse(provider) {
                Some(provider) => Input::ApiKey {
                    provider,
                    key: (*key).to_string(),
                },
                None => Input::Invalid(format!("Unknown key provider: {provider}")),
            },
            // Empty key reaches the core, which rejects it with its own toast
            [provider] => match KeyProvider::parse(provider) {
                Some(provider) => Input::ApiKey {
                    provider,
                    key: String::new(),
                },
                None => Input::Invalid(format!("Unknown key provider: {provider}")),
            },
            _ => Input::Invalid("Usage: /key <anthropic|openai> <key>".into()),
        },
        "browse" if !rest.is_empty() => Input::Browse(rest.to_string()),
        "browse" => Input::Browse("~".into()),
        "agent" => Input::ToggleAgent,
        "help" => Input::Help,
        other => Input::Invalid(format!("Unknown command: /{other}")),
    }
}
