//! # TranscriptView Component
//!
//! Scrollable chat history, with the in-progress streaming reply drawn as a
//! final bubble until `stream_end` turns it into a real message.
//!
//! `TranscriptView` is created each frame and wraps `&mut TranscriptState`,
//! which persists the scroll position between frames. New content keeps the
//! view pinned to the bottom unless the user has scrolled up.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::logs::format_time;
use crate::core::transcript::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

pub struct TranscriptState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    pub viewport_height: u16,
    pub content_height: u16,
}

impl Default for TranscriptState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            viewport_height: 0,
            content_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Re-engage auto-scroll once the user scrolls back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for TranscriptState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

pub struct TranscriptView<'a> {
    pub state: &'a mut TranscriptState,
    pub transcript: &'a Transcript,
    /// Buffered reply text while a stream is open.
    pub streaming: Option<&'a str>,
}

impl<'a> TranscriptView<'a> {
    pub fn new(
        state: &'a mut TranscriptState,
        transcript: &'a Transcript,
        streaming: Option<&'a str>,
    ) -> Self {
        Self {
            state,
            transcript,
            streaming,
        }
    }
}

impl Component for TranscriptView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.transcript.is_empty() && self.streaming.is_none() {
            let hint = Paragraph::new("Connected agents reply here. Type a message and press Enter.")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(hint, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // scrollbar column

        let times: Vec<String> = self
            .transcript
            .messages()
            .iter()
            .map(|m| format_time(&m.timestamp))
            .collect();
        let mut bubbles: Vec<Message<'_>> = self
            .transcript
            .messages()
            .iter()
            .zip(&times)
            .map(|(m, time)| Message::new(m.role, &m.content, Some(time)))
            .collect();
        if let Some(partial) = self.streaming {
            bubbles.push(Message::streaming(partial));
        }

        let heights: Vec<u16> = bubbles
            .iter()
            .map(|b| b.calculate_height(content_width))
            .collect();
        let total_height = heights.iter().fold(0u16, |acc, h| acc.saturating_add(*h));

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;
        if !self.state.stick_to_bottom {
            let max_y = self.state.max_offset();
            if self.state.scroll_state.offset().y > max_y {
                self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
            }
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (bubble, height) in bubbles.into_iter().zip(heights) {
            scroll_view.render_widget(bubble, Rect::new(0, y_offset, content_width, height));
            y_offset = y_offset.saturating_add(height);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
