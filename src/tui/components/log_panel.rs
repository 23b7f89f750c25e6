//! # LogPanel Component
//!
//! The terminal view: the activity log, one line per entry, newest at the
//! bottom. The panel always tails; the buffer holds at most 100 entries so
//! there is little to scroll back through.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::logs::{LogBuffer, LogEntry, LogLevel, format_time};
use crate::tui::component::Component;

pub struct LogPanel<'a> {
    pub logs: &'a LogBuffer,
}

impl<'a> LogPanel<'a> {
    pub fn new(logs: &'a LogBuffer) -> Self {
        Self { logs }
    }
}

pub fn level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Info => Style::default().fg(Color::Gray),
        LogLevel::Success => Style::default().fg(Color::Green),
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn entry_line(entry: &LogEntry) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("[{}] ", format_time(&entry.timestamp)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(entry.message.clone(), level_style(entry.level)),
    ])
}

impl Component for LogPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!("terminal ({}/{})", self.logs.len(), self.logs.capacity()));
        let inner = block.inner(area);

        let lines: Vec<Line<'static>> = self.logs.iter().map(entry_line).collect();
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });

        // Tail: skip the rows that don't fit
        let total = paragraph.line_count(inner.width);
        let overflow = total.saturating_sub(usize::from(inner.height));
        let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);

        frame.render_widget(paragraph.block(block).scroll((scroll, 0)), area);
    }
}
