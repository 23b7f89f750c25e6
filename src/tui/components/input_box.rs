//! # InputBox Component
//!
//! Single-line chat input. Owns the text being typed and a cursor (byte
//! offset, always on a char boundary). When the text is wider than the box
//! the view scrolls horizontally to keep the cursor visible; column math uses
//! display width so emoji and CJK land where the terminal draws them.
//!
//! The agent-mode flag is a prop shown in the title.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders consumed horizontally (left + right).
const HORIZONTAL_OVERHEAD: u16 = 2;
pub const HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed with non-blank text. The buffer is cleared.
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Prop: agent mode, shown in the title.
    pub agent_active: bool,
    cursor: usize,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            agent_active: false,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Slice of the buffer to draw and the cursor column within it.
    fn visible(&self, inner_width: u16) -> (&str, u16) {
        let width = usize::from(inner_width);
        if width == 0 {
            return ("", 0);
        }
        let before = &self.buffer[..self.cursor];

        // Drop leading chars until the cursor fits (one cell kept for it)
        let mut start = 0;
        let mut cursor_col = before.width();
        for c in before.chars() {
            if cursor_col < width {
                break;
            }
            cursor_col -= c.width().unwrap_or(0);
            start += c.len_utf8();
        }

        let mut end = start;
        let mut used = 0;
        for c in self.buffer[start..].chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            end += c.len_utf8();
        }

        let cursor_col = u16::try_from(cursor_col).unwrap_or(inner_width);
        (&self.buffer[start..end], cursor_col)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.agent_active {
            "message · agent mode ON"
        } else {
            "message"
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green))
            .title(title)
            .title_bottom("Enter send · Tab view · Ctrl+A agent · F2-F5 tools · /help");
        let inner = block.inner(area);

        let (text, cursor_col) = self.visible(area.width.saturating_sub(HORIZONTAL_OVERHEAD));
        frame.render_widget(Paragraph::new(text.to_string()).block(block), area);

        if inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((inner.x + cursor_col.min(inner.width - 1), inner.y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut encoded));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line: fold newlines into spaces
                let flat: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&flat);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if self.cursor > 0 => {
                self.cursor = self.prev_boundary();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if self.cursor < self.buffer.len() => {
                self.cursor = self.next_boundary();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome if self.cursor > 0 => {
                self.cursor = 0;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorEnd if self.cursor < self.buffer.len() => {
                self.cursor = self.buffer.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit if !self.buffer.trim().is_empty() => {
                self.cursor = 0;
                Some(InputEvent::Submit(std::mem::take(&mut self.buffer)))
            }
            _ => None,
        }
    }
}
