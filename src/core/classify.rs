//! Substring rules that decide where inbound text goes.
//!
//! The server sometimes pushes status reports as plain `message` events, and
//! re-sends its welcome notification on every reconnect. Both are recognized
//! by marker substrings; keep these in sync with the server's wording.

/// Present in the server's greeting notification.
pub const WELCOME_MARKER: &str = "Connected to PocketClaw";

/// Any of these marks a `message` as a status report.
pub const STATUS_MARKERS: [&str; 2] = ["System Status", "🧠 CPU:"];

/// Log mirror length for chat messages, in characters.
pub const LOG_PREVIEW_CHARS: usize = 80;

pub fn is_status_report(content: &str) -> bool {
    STATUS_MARKERS.iter().any(|marker| content.contains(marker))
}

pub fn is_welcome(content: &str) -> bool {
    content.contains(WELCOME_MARKER)
}

/// First [`LOG_PREVIEW_CHARS`] characters, with `...` appended when cut.
pub fn log_preview(content: &str) -> String {
    match content.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// Code block shown as its own transcript entry.
pub fn fence_code(code: &str) -> String {
    format!("```\n{code}\n```")
}

/// Code block appended to an open stream; padded so it never fuses with prose.
pub fn fence_code_chunk(code: &str) -> String {
    format!("\n```\n{code}\n```\n")
}
