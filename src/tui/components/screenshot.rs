//! # ScreenshotPopup Component
//!
//! A terminal can't show the PNG, so the popup reports that one arrived and
//! how large it is. Esc dismisses it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::tui::component::Component;

pub struct ScreenshotPopup<'a> {
    /// The `data:image/png;base64,...` URI.
    pub src: &'a str,
}

impl<'a> ScreenshotPopup<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src }
    }

    /// Decoded size estimate from the base64 payload length.
    pub fn approx_bytes(&self) -> usize {
        let payload = self.src.split_once(',').map_or(self.src, |(_, data)| data);
        let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
        (payload.len() / 4 * 3).saturating_sub(padding)
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

impl Component for ScreenshotPopup<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rect = centered(area, 44.min(area.width), 5.min(area.height));
        let kib = self.approx_bytes() as f64 / 1024.0;
        let lines = vec![
            Line::styled(
                "Screenshot received",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::from(format!("PNG, about {kib:.1} KiB")),
            Line::styled("Esc to dismiss", Style::default().fg(Color::DarkGray)),
        ];
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title("screenshot");

        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(lines).block(block).centered(), rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_approx_bytes() {
        assert_eq!(ScreenshotPopup::new("data:image/png;base64,AAAA").approx_bytes(), 3);
        assert_eq!(ScreenshotPopup::new("data:image/png;base64,AA==").approx_bytes(), 1);
        assert_eq!(ScreenshotPopup::new("data:image/png;base64,").approx_bytes(), 0);
    }

    #[test]
    fn test_render_popup() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let src = format!("data:image/png;base64,{}", "A".repeat(4096));
        terminal
            .draw(|f| ScreenshotPopup::new(&src).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Screenshot received"));
        assert!(text.contains("3.0 KiB"));
    }
}
