use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::{Dashboard, View};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    LogPanel, ScreenshotPopup, StatusBar, Toasts, TranscriptView, input_box,
};

/// Draw one frame: status bar, the active view, the input box, then overlays.
pub fn draw_ui(frame: &mut Frame, dashboard: &Dashboard, connected: bool, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [status_area, main_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_box::HEIGHT)]).areas(frame.area());

    StatusBar::new(
        connected,
        dashboard.agent_active,
        dashboard.view,
        &dashboard.status,
    )
    .render(frame, status_area);

    match dashboard.view {
        View::Chat => {
            let streaming = dashboard
                .stream
                .is_active()
                .then(|| dashboard.stream.content());
            TranscriptView::new(&mut tui.transcript, &dashboard.transcript, streaming)
                .render(frame, main_area);
        }
        View::Terminal => LogPanel::new(&dashboard.logs).render(frame, main_area),
    }

    tui.input_box.agent_active = dashboard.agent_active;
    tui.input_box.render(frame, input_area);

    if dashboard.show_screenshot {
        ScreenshotPopup::new(&dashboard.screenshot_src).render(frame, main_area);
    }
    Toasts::new(&dashboard.toasts).render(frame, main_area);
}
