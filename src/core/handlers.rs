//! The fixed set of inbound event handlers.

use log::debug;

use crate::channel::{EventKind, EventPayload};
use crate::core::action::Effect;
use crate::core::classify::{
    fence_code, fence_code_chunk, is_status_report, is_welcome, log_preview,
};
use crate::core::dispatch::Handler;
use crate::core::logs::LogLevel;
use crate::core::state::Dashboard;
use crate::core::status::parse_status;
use crate::core::transcript::Role;

pub const STATUS_TOOL: &str = "status";
const UNKNOWN_ERROR: &str = "Unknown error";
const SCREENSHOT_URI_PREFIX: &str = "data:image/png;base64,";

/// Every event the dashboard listens for, paired with its handler.
pub fn standard_handlers() -> [(EventKind, Handler); 10] {
    [
        (EventKind::Connected, on_connected as Handler),
        (EventKind::Disconnected, on_disconnected as Handler),
        (EventKind::Message, on_message as Handler),
        (EventKind::Notification, on_notification as Handler),
        (EventKind::Status, on_status as Handler),
        (EventKind::Screenshot, on_screenshot as Handler),
        (EventKind::Code, on_code as Handler),
        (EventKind::Error, on_error as Handler),
        (EventKind::StreamStart, on_stream_start as Handler),
        (EventKind::StreamEnd, on_stream_end as Handler),
    ]
}

pub fn on_connected(dashboard: &mut Dashboard, _: &EventPayload) -> Effect {
    dashboard.log("Connected to PocketClaw Engine", LogLevel::Success);
    Effect::RunTool(STATUS_TOOL.to_string())
}

pub fn on_disconnected(dashboard: &mut Dashboard, _: &EventPayload) -> Effect {
    dashboard.log("Disconnected from server", LogLevel::Error);
    Effect::None
}

pub fn on_message(dashboard: &mut Dashboard, payload: &EventPayload) -> Effect {
    let content = payload.content();

    // Status reports update the snapshot instead of the transcript; every
    // message is mirrored to the log either way
    if is_status_report(content) {
        dashboard.status = parse_status(content);
    } else {
        dashboard.deliver(content);
    }
    dashboard.log(log_preview(content), LogLevel::Info);
    Effect::None
}

pub fn on_notification(dashboard: &mut Dashboard, payload: &EventPayload) -> Effect {
    let content = payload.content();

    if is_welcome(content) {
        if dashboard.welcome_shown {
            debug!("Suppressing repeated welcome notification");
            return Effect::None;
        }
        dashboard.welcome_shown = true;
    }

    dashboard.toast(content, LogLevel::Info);
    dashboard.log(content, LogLevel::Info);
    Effect::None
}

pub fn on_status(dashboard: &mut Dashboard, payload: &EventPayload) -> Effect {
    let content = payload.content();
    if !content.is_empty() {
        dashboard.status = parse_status(content);
    }
    Effect::None
}

pub fn on_screenshot(dashboard: &mut Dashboard, payload: &EventPayload) -> Effect {
    let image = payload.image();
    if !image.is_empty() {
        dashboard.screenshot_src = format!("{SCREENSHOT_URI_PREFIX}{image}");
        dashboard.show_screenshot = true;
    }
    Effect::None
}

pub fn on_code(dashboard: &mut Dashboard, payload: &EventPayload) -> Effect {
    let code = payload.content();
    if dashboard.stream.is_active() {
        dashboard.stream.push(&fence_code_chunk(code));
    } else {
        dashboard.add_message(Role::Assistant, fence_code(code));
    }
    Effect::None
}

pub fn on_error(dashboard: &mut Dashboard, payload: &EventPayload) -> Effect {
    let content = match payload.content() {
        "" => UNKNOWN_ERROR,
        text => text,
    };

    let dropped = dashboard.stream.abort();
    if dropped > 0 {
        debug!("Error ended stream, discarded {dropped} buffered bytes");
    }

    dashboard.add_message(Role::Assistant, format!("❌ {content}"));
    dashboard.log(content, LogLevel::Error);
    dashboard.toast(content, LogLevel::Error);
    Effect::None
}

pub fn on_stream_start(dashboard: &mut Dashboard, _: &EventPayload) -> Effect {
    dashboard.stream.start();
    Effect::None
}

pub fn on_stream_end(dashboard: &mut Dashboard, _: &EventPayload) -> Effect {
    if let Some(reply) = dashboard.stream.finish() {
        dashboard.add_message(Role::Assistant, reply);
    }
    Effect::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status::StatusSnapshot;

    fn text(content: &str) -> EventPayload {
        EventPayload {
            content: Some(content.to_string()),
            image: None,
        }
    }

    fn empty() -> EventPayload {
        EventPayload::default()
    }

    #[test]
    fn test_every_event_kind_has_a_handler() {
        let handlers = standard_handlers();
        for kind in EventKind::ALL {
            assert!(handlers.iter().any(|(k, _)| *k == kind), "missing {kind:?}");
        }
    }

    #[test]
    fn test_connected_requests_status() {
        let mut dashboard = Dashboard::default();
        let effect = on_connected(&mut dashboard, &empty());
        assert_eq!(effect, Effect::RunTool("status".into()));
        assert_eq!(dashboard.logs.last().unwrap().level, LogLevel::Success);
    }

    #[test]
    fn test_status_message_never_reaches_transcript() {
        let mut dashboard = Dashboard::default();
        on_message(&mut dashboard, &text("🖥️ System Status\n🧠 CPU: 10%\n💾 RAM: 2 GB"));
        assert!(dashboard.transcript.is_empty());
        assert_eq!(dashboard.logs.len(), 1);
        assert!(dashboard.logs.last().unwrap().message.contains("System Status"));
        assert_eq!(dashboard.status.cpu, "10%");
        assert_eq!(dashboard.status.ram, "2 GB");

        // Wholesale overwrite: fields absent from the next report reset.
        on_message(&mut dashboard, &text("🧠 CPU: 55%"));
        assert!(dashboard.transcript.is_empty());
        assert_eq!(dashboard.status.cpu, "55%");
        assert_eq!(dashboard.status.ram, StatusSnapshot::default().ram);
    }

    #[test]
    fn test_message_is_logged_as_preview() {
        let mut dashboard = Dashboard::default();
        let long = "z".repeat(120);
        on_message(&mut dashboard, &text(&long));
        assert_eq!(dashboard.transcript.last().unwrap().content, long);
        assert_eq!(dashboard.logs.last().unwrap().message, format!("{}...", "z".repeat(80)));
    }

    #[test]
    fn test_message_while_streaming_is_buffered_but_logged() {
        let mut dashboard = Dashboard::default();
        on_stream_start(&mut dashboard, &empty());
        on_message(&mut dashboard, &text("partial"));
        assert!(dashboard.transcript.is_empty());
        assert_eq!(dashboard.stream.content(), "partial");
        assert_eq!(dashboard.logs.last().unwrap().message, "partial");
    }

    #[test]
    fn test_missing_message_content_defaults_to_empty() {
        let mut dashboard = Dashboard::default();
        on_message(&mut dashboard, &empty());
        assert_eq!(dashboard.transcript.last().unwrap().content, "");
    }

    #[test]
    fn test_welcome_shown_once() {
        let mut dashboard = Dashboard::default();
        for _ in 0..3 {
            on_notification(&mut dashboard, &text("👋 Connected to PocketClaw!"));
        }
        assert!(dashboard.welcome_shown);
        assert_eq!(dashboard.toasts.len(), 1);
        assert_eq!(dashboard.logs.len(), 1);
    }

    #[test]
    fn test_other_notifications_always_shown() {
        let mut dashboard = Dashboard::default();
        for _ in 0..3 {
            on_notification(&mut dashboard, &text("🧠 Agent Mode: ON"));
        }
        assert!(!dashboard.welcome_shown);
        assert_eq!(dashboard.toasts.len(), 3);
        assert_eq!(dashboard.logs.len(), 3);
    }

    #[test]
    fn test_status_event_ignores_empty_content() {
        let mut dashboard = Dashboard::default();
        on_status(&mut dashboard, &text("🧠 CPU: 7%"));
        on_status(&mut dashboard, &empty());
        assert_eq!(dashboard.status.cpu, "7%");
    }

    #[test]
    fn test_screenshot_sets_data_uri() {
        let mut dashboard = Dashboard::default();
        on_screenshot(&mut dashboard, &empty());
        assert!(!dashboard.show_screenshot);

        let payload = EventPayload {
            content: None,
            image: Some("iVBORw0KGgo=".into()),
        };
        on_screenshot(&mut dashboard, &payload);
        assert!(dashboard.show_screenshot);
        assert_eq!(dashboard.screenshot_src, "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_code_is_fenced_and_not_logged() {
        let mut dashboard = Dashboard::default();
        on_code(&mut dashboard, &text("print('hi')"));
        assert_eq!(dashboard.transcript.last().unwrap().content, "```\nprint('hi')\n```");
        assert!(dashboard.logs.is_empty());

        on_stream_start(&mut dashboard, &empty());
        on_message(&mut dashboard, &text("Running:"));
        on_code(&mut dashboard, &text("ls"));
        on_stream_end(&mut dashboard, &empty());
        assert_eq!(dashboard.transcript.len(), 2);
        assert_eq!(dashboard.transcript.last().unwrap().content, "Running:\n```\nls\n```\n");
    }

    #[test]
    fn test_code_with_status_markers_is_not_classified() {
        let mut dashboard = Dashboard::default();
        on_code(&mut dashboard, &text("echo 'System Status'"));
        assert_eq!(dashboard.transcript.len(), 1);
        assert_eq!(dashboard.status, StatusSnapshot::default());
    }

    #[test]
    fn test_error_discards_stream_and_posts_once() {
        let mut dashboard = Dashboard::default();
        on_stream_start(&mut dashboard, &empty());
        on_message(&mut dashboard, &text("half a rep"));
        on_error(&mut dashboard, &text("model crashed"));

        assert!(!dashboard.stream.is_active());
        assert_eq!(dashboard.transcript.len(), 1);
        assert_eq!(dashboard.transcript.last().unwrap().content, "❌ model crashed");
        assert_eq!(dashboard.logs.last().unwrap().level, LogLevel::Error);
        assert_eq!(dashboard.toasts.last().unwrap().level, LogLevel::Error);

        // A late stream_end has nothing left to materialize.
        on_stream_end(&mut dashboard, &empty());
        assert_eq!(dashboard.transcript.len(), 1);
    }

    #[test]
    fn test_error_without_content() {
        let mut dashboard = Dashboard::default();
        on_error(&mut dashboard, &empty());
        assert_eq!(dashboard.transcript.last().unwrap().content, "❌ Unknown error");
        assert_eq!(dashboard.logs.last().unwrap().message, "Unknown error");
    }

    #[test]
    fn test_stream_end_without_start_is_noop() {
        let mut dashboard = Dashboard::default();
        on_stream_end(&mut dashboard, &empty());
        assert!(dashboard.transcript.is_empty());
    }
}
