//! # StatusBar Component
//!
//! Top line: connection state, agent mode, the current view and the latest
//! system snapshot. Stateless; every field is a prop.
//!
//! ```text
//! PocketClaw ● online │ agent OFF │ [chat] terminal │ CPU 12% RAM 4.1/16 GB Disk 61% Bat 88%
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::View;
use crate::core::status::StatusSnapshot;
use crate::tui::component::Component;

pub struct StatusBar<'a> {
    pub connected: bool,
    pub agent_active: bool,
    pub view: View,
    pub status: &'a StatusSnapshot,
}

impl<'a> StatusBar<'a> {
    pub fn new(connected: bool, agent_active: bool, view: View, status: &'a StatusSnapshot) -> Self {
        Self {
            connected,
            agent_active,
            view,
            status,
        }
    }

    fn line(&self) -> Line<'static> {
        let sep = || Span::styled(" │ ", Style::default().fg(Color::DarkGray));
        let (dot, label) = if self.connected {
            (Span::styled("●", Style::default().fg(Color::Green)), " online")
        } else {
            (Span::styled("●", Style::default().fg(Color::Red)), " offline")
        };
        let agent = if self.agent_active {
            Span::styled("agent ON", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            Span::styled("agent OFF", Style::default().fg(Color::DarkGray))
        };
        let tab = |view: View, name: &'static str| {
            if view == self.view {
                Span::styled(format!("[{name}]"), Style::default().add_modifier(Modifier::BOLD))
            } else {
                Span::styled(name, Style::default().fg(Color::DarkGray))
            }
        };

        let mut spans = vec![
            Span::styled("PocketClaw ", Style::default().add_modifier(Modifier::BOLD)),
            dot,
            Span::raw(label),
            sep(),
            agent,
            sep(),
            tab(View::Chat, "chat"),
            Span::raw(" "),
            tab(View::Terminal, "terminal"),
            sep(),
        ];
        for (name, value) in [
            ("CPU", &self.status.cpu),
            ("RAM", &self.status.ram),
            ("Disk", &self.status.disk),
            ("Bat", &self.status.battery),
        ] {
            spans.push(Span::styled(format!("{name} "), Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw(format!("{value} ")));
        }
        Line::from(spans)
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}
