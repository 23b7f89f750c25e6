//! Handler registry for inbound channel events.
//!
//! One handler per event kind. Re-registration replaces rather than stacks,
//! and [`clear`](HandlerRegistry::clear) resets the whole table, so running
//! setup twice never doubles a side effect.

use std::collections::HashMap;

use crate::channel::{EventKind, EventPayload};
use crate::core::action::Effect;
use crate::core::state::Dashboard;

/// Mutates the dashboard for one event and names any outbound follow-up.
pub type Handler = fn(&mut Dashboard, &EventPayload) -> Effect;

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<EventKind, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Bind `handler` to `kind`, replacing any previous binding.
    pub fn register(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    pub fn get(&self, kind: EventKind) -> Option<Handler> {
        self.handlers.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logs::LogLevel;

    fn mark_a(dashboard: &mut Dashboard, _: &EventPayload) -> Effect {
        dashboard.log("a", LogLevel::Info);
        Effect::None
    }

    fn mark_b(dashboard: &mut Dashboard, _: &EventPayload) -> Effect {
        dashboard.log("b", LogLevel::Info);
        Effect::None
    }

    #[test]
    fn test_register_replaces_existing_binding() {
        let mut registry = HandlerRegistry::new();
        registry.register(EventKind::Message, mark_a);
        registry.register(EventKind::Message, mark_b);
        assert_eq!(registry.len(), 1);

        let mut dashboard = Dashboard::default();
        let handler = registry.get(EventKind::Message).unwrap();
        handler(&mut dashboard, &EventPayload::default());
        assert_eq!(dashboard.logs.len(), 1);
        assert_eq!(dashboard.logs.last().unwrap().message, "b");
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut registry = HandlerRegistry::new();
        registry.register(EventKind::Message, mark_a);
        registry.register(EventKind::Error, mark_b);
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.get(EventKind::Message).is_none());
    }
}
