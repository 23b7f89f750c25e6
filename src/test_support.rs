//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;

use crate::channel::{Channel, ChannelError, Command, EventKind, InboundEvent};
use crate::core::state::Settings;
use crate::core::view_model::ViewModel;

/// An in-memory channel. Tests queue inbound events and inspect what was sent.
///
/// `connect` only counts calls; flip `connected` by hand to simulate the
/// socket coming up.
#[derive(Default)]
pub struct MockChannel {
    pub connected: bool,
    pub connect_calls: usize,
    pub inbound: VecDeque<InboundEvent>,
    pub sent: Vec<Command>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InboundEvent) {
        self.inbound.push_back(event);
    }
}

impl Channel for MockChannel {
    fn name(&self) -> &str {
        "mock"
    }

    fn connect(&mut self) -> Result<(), ChannelError> {
        self.connect_calls += 1;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn next_event(&mut self) -> Option<InboundEvent> {
        self.inbound.pop_front()
    }

    fn send(&mut self, command: Command) -> Result<(), ChannelError> {
        if !self.connected {
            return Err(ChannelError::NotConnected);
        }
        self.sent.push(command);
        Ok(())
    }
}

pub fn event(kind: EventKind) -> InboundEvent {
    InboundEvent::new(kind)
}

pub fn text_event(kind: EventKind, content: &str) -> InboundEvent {
    InboundEvent::with_content(kind, content)
}

/// A view-model on a live mock channel, handlers bound, with the
/// connect-time status request already cleared from `sent`.
pub fn connected_view_model() -> ViewModel<MockChannel> {
    let mut channel = MockChannel::new();
    channel.connected = true;
    let mut vm = ViewModel::new(channel, Settings::default());
    vm.setup_handlers();
    vm.channel_mut().sent.clear();
    vm
}
