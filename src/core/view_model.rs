//! # Dashboard View-Model
//!
//! Binds a [`Dashboard`] to a [`Channel`]. Inbound events run through the
//! handler registry; user actions run through [`update`]. Either may yield an
//! [`Effect`], which is executed here against the channel.
//!
//! ```text
//!   channel.next_event() ─▶ registry[kind](dashboard, payload) ─┐
//!   perform(action) ──────▶ update(dashboard, action) ──────────┼─▶ Effect ─▶ channel.send
//!   tick(now) ────────────▶ poller due && connected ────────────┘
//! ```
//!
//! Everything runs on the caller's thread; nothing here blocks.

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::channel::{Channel, ChannelError, EventKind, InboundEvent};
use crate::core::action::{Action, Effect, update};
use crate::core::dispatch::HandlerRegistry;
use crate::core::handlers::{STATUS_TOOL, standard_handlers};
use crate::core::logs::LogLevel;
use crate::core::poller::StatusPoller;
use crate::core::state::{Dashboard, Settings};

pub struct ViewModel<C: Channel> {
    channel: C,
    registry: HandlerRegistry,
    poller: StatusPoller,
    pub dashboard: Dashboard,
}

impl<C: Channel> ViewModel<C> {
    pub fn new(channel: C, settings: Settings) -> Self {
        Self {
            channel,
            registry: HandlerRegistry::new(),
            poller: StatusPoller::new(Instant::now()),
            dashboard: Dashboard::new(settings),
        }
    }

    /// Register handlers, start connecting and arm the status poller.
    pub fn init(&mut self, now: Instant) {
        self.dashboard
            .log("PocketClaw Dashboard initialized", LogLevel::Info);
        self.setup_handlers();

        if let Err(e) = self.channel.connect() {
            warn!("{} channel failed to start: {}", self.channel.name(), e);
            self.dashboard
                .log(format!("Connection failed: {e}"), LogLevel::Error);
        }

        self.poller = StatusPoller::new(now);
    }

    /// Reset the registry and bind the standard handler set.
    ///
    /// If the channel is already up, `connected` fires here once, since the
    /// real event went out before anyone was listening.
    pub fn setup_handlers(&mut self) {
        self.registry.clear();
        for (kind, handler) in standard_handlers() {
            self.registry.register(kind, handler);
        }
        debug!("Registered {} event handlers", self.registry.len());

        if self.channel.is_connected() {
            self.dispatch(&InboundEvent::new(EventKind::Connected));
        }
    }

    /// Run the handler bound to `event.kind`. Returns `false` if none is bound.
    pub fn dispatch(&mut self, event: &InboundEvent) -> bool {
        let Some(handler) = self.registry.get(event.kind) else {
            debug!("No handler bound for {} event", event.kind.as_str());
            return false;
        };
        let effect = handler(&mut self.dashboard, &event.payload);
        self.apply(effect);
        true
    }

    /// Drain every event the channel has delivered so far, in order.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.channel.next_event() {
            self.dispatch(&event);
            handled += 1;
        }
        handled
    }

    /// Timer work: status poll when due and connected, toast expiry.
    pub fn tick(&mut self, now: Instant) {
        if self.poller.due(now) && self.channel.is_connected() {
            self.apply(Effect::RunTool(STATUS_TOOL.to_string()));
        }
        self.dashboard.prune_toasts(now);
    }

    pub fn perform(&mut self, action: Action) {
        let effect = update(&mut self.dashboard, action);
        self.apply(effect);
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// How long the caller may sleep before the next poll is due.
    pub fn next_tick_in(&self, now: Instant) -> Duration {
        self.poller.remaining(now)
    }

    fn apply(&mut self, effect: Effect) {
        let result = match &effect {
            Effect::None => return,
            Effect::RunTool(tool) => self.channel.run_tool(tool),
            Effect::Chat(message) => self.channel.chat(message),
            Effect::ToggleAgent(active) => self.channel.toggle_agent(*active),
            Effect::SaveSettings {
                agent_backend,
                llm_provider,
            } => self.channel.save_settings(agent_backend, llm_provider),
            Effect::SaveApiKey { provider, key } => {
                self.channel.save_api_key(provider.as_str(), key)
            }
            Effect::Navigate(path) => self.channel.navigate(path),
        };

        if let Err(e) = result {
            self.report_send_failure(&effect, &e);
        }
    }

    fn report_send_failure(&mut self, effect: &Effect, error: &ChannelError) {
        warn!("Outbound request failed: {}", error);
        self.dashboard
            .log(format!("Request not sent: {error}"), LogLevel::Error);

        // The reply that would have closed this stream is never coming.
        if matches!(effect, Effect::Chat(_)) {
            info!("Chat not sent, closing the stream opened for it");
            self.dashboard.stream.abort();
        }
    }
}
