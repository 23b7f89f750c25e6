//! # Toasts Component
//!
//! Transient notifications stacked in the top-right corner, newest on top.
//! Expiry is the core's job (`Dashboard::prune_toasts`); this only draws.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::core::logs::LogLevel;
use crate::core::state::Toast;
use crate::tui::component::Component;

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 3;

pub struct Toasts<'a> {
    pub toasts: &'a [Toast],
}

impl<'a> Toasts<'a> {
    pub fn new(toasts: &'a [Toast]) -> Self {
        Self { toasts }
    }
}

/// First wrapped line of `message`, with `…` when the rest doesn't fit.
fn fit(message: &str, width: usize) -> String {
    let options = textwrap::Options::new(width.saturating_sub(1).max(1));
    let mut lines = textwrap::wrap(message, options).into_iter();
    let first = lines.next().map(|line| line.into_owned()).unwrap_or_default();
    if lines.next().is_some() {
        format!("{first}…")
    } else {
        first
    }
}

fn border_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Info => Color::Cyan,
        LogLevel::Success => Color::Green,
        LogLevel::Error => Color::Red,
    }
}

impl Component for Toasts<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width - width;
        let mut y = area.y;

        for toast in self.toasts.iter().rev() {
            if y + TOAST_HEIGHT > area.y + area.height {
                break;
            }
            let rect = Rect::new(x, y, width, TOAST_HEIGHT);
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color(toast.level)));
            frame.render_widget(Clear, rect);
            let text = fit(&toast.message, usize::from(width.saturating_sub(2)));
            frame.render_widget(Paragraph::new(text).block(block), rect);
            y += TOAST_HEIGHT;
        }
    }
}
