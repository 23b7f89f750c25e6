use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Core actions (mapped to core::Action by the event loop)
    ForceQuit,   // Ctrl+C
    Escape,      // dismiss screenshot, else quit
    Submit,      // Enter
    SwitchView,  // Tab
    ToggleAgent, // Ctrl+A
    /// Quick tool keys F2..F5
    RunTool(&'static str),

    // TUI-local events (handled directly in TUI)
    InputChar(char),
    Paste(String),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    Resize,
}

/// Poll for an event with timeout.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Terminal poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(event) => translate(event),
        Err(e) => {
            log::warn!("Terminal read failed: {}", e);
            None
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Map a raw crossterm event onto a `TuiEvent`. `None` means ignore it.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Debug line for a key press. Character keys are never described: typed
/// text can be an API key (`/key openai sk-...`).
fn key_log_line(key_event: &KeyEvent) -> Option<String> {
    match key_event.code {
        KeyCode::Char(_) => None,
        code => Some(format!(
            "Key event: {:?} with modifiers {:?}",
            code, key_event.modifiers
        )),
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement reports releases too; act on press/repeat only
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    if let Some(line) = key_log_line(&key_event) {
        log::debug!("{}", line);
    }
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => Some(TuiEvent::ToggleAgent),
        (_, KeyCode::F(2)) => Some(TuiEvent::RunTool("status")),
        (_, KeyCode::F(3)) => Some(TuiEvent::RunTool("screenshot")),
        (_, KeyCode::F(4)) => Some(TuiEvent::RunTool("fetch")),
        (_, KeyCode::F(5)) => Some(TuiEvent::RunTool("panic")),
        (_, KeyCode::Tab) => Some(TuiEvent::SwitchView),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::Up) => Some(TuiEvent::ScrollUp),
        (_, KeyCode::Down) => Some(TuiEvent::ScrollDown),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        (modifiers, KeyCode::Char(c)) if !modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TuiEvent::InputChar(c))
        }
        _ => None,
    }
}
