use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::Role;
use crate::tui::component::Component;
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// One chat bubble. Built fresh each frame from transcript data.
///
/// Assistant content is rendered as Markdown; user content is shown verbatim.
/// The in-progress streaming reply uses the same bubble with `streaming` set.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub role: Role,
    pub content: &'a str,
    /// `HH:MM:SS`, shown in the top-right corner.
    pub time: Option<&'a str>,
    pub streaming: bool,
}

impl<'a> Message<'a> {
    pub fn new(role: Role, content: &'a str, time: Option<&'a str>) -> Self {
        Self {
            role,
            content,
            time,
            streaming: false,
        }
    }

    pub fn streaming(content: &'a str) -> Self {
        Self {
            role: Role::Assistant,
            content,
            time: None,
            streaming: true,
        }
    }

    fn style(&self) -> Style {
        match self.role {
            Role::User => Style::default().fg(Color::Green),
            Role::Assistant => Style::default().fg(Color::Blue),
        }
    }

    fn body(&self) -> Text<'static> {
        let content = self.content.trim();
        match self.role {
            Role::User => Text::raw(content.to_string()).style(self.style()),
            Role::Assistant => markdown::render(content, Color::Blue),
        }
    }

    fn paragraph(&self) -> Paragraph<'static> {
        Paragraph::new(self.body()).wrap(Wrap { trim: false })
    }

    /// Rows this bubble needs at `width`, borders included.
    ///
    /// Uses the same `Paragraph` that `render` draws, so the prediction
    /// always matches what lands on screen.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        if self.content.trim().is_empty() {
            return VERTICAL_OVERHEAD + u16::from(self.streaming);
        }
        let lines = self.paragraph().line_count(content_width);
        u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(VERTICAL_OVERHEAD)
    }
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self.style();
        let border_style = if self.streaming {
            Style::default().fg(Color::Yellow)
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let title = if self.streaming {
            format!("{} · streaming…", self.role.label())
        } else {
            self.role.label().to_string()
        };

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(title).style(border_style))
            .padding(Padding::horizontal(CONTENT_PAD_H));
        if let Some(time) = self.time {
            block = block.title(Line::from(time.to_string()).style(border_style).right_aligned());
        }

        let inner = block.inner(area);
        block.render(area, buf);

        if self.streaming && self.content.trim().is_empty() {
            Paragraph::new("…")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }
        self.paragraph().render(inner, buf);
    }
}

impl Component for Message<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn calculate_height_single_line() {
        let message = Message::new(Role::User, "Hello", None);
        assert_eq!(message.calculate_height(80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_empty_is_just_borders() {
        let message = Message::new(Role::Assistant, "  \n ", None);
        assert_eq!(message.calculate_height(80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_streaming_placeholder_has_a_row() {
        assert_eq!(Message::streaming("").calculate_height(80), VERTICAL_OVERHEAD + 1);
    }

    #[test]
    fn calculate_height_too_narrow() {
        let message = Message::new(Role::User, "Hello world", None);
        assert_eq!(message.calculate_height(HORIZONTAL_OVERHEAD), 1);
    }

    #[test]
    fn calculate_height_wraps() {
        let message = Message::new(Role::User, "Hello world", None);
        // content width 8: "Hello" | "world"
        assert_eq!(message.calculate_height(8 + HORIZONTAL_OVERHEAD), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_counts_code_fence_frame() {
        let message = Message::new(Role::Assistant, "```\nls\n```", None);
        // ╭── / │ ls / ╰──
        assert_eq!(message.calculate_height(40), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn render_shows_role_time_and_content() {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        let mut message = Message::new(Role::Assistant, "All good", Some("12:30:05"));
        terminal.draw(|f| Component::render(&mut message, f, f.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("pocketclaw"));
        assert!(text.contains("12:30:05"));
        assert!(text.contains("All good"));
    }

    #[test]
    fn render_streaming_bubble() {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        let mut message = Message::streaming("");
        terminal.draw(|f| Component::render(&mut message, f, f.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("streaming"));
        assert!(text.contains('…'));
    }
}
