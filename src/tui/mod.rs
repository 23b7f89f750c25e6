//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the dashboard,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loop
//!
//! Each pass draws (if something changed), waits for terminal input no longer
//! than the next status poll or a short idle bound, drains every pending key,
//! then pumps channel events into the view-model and ticks its timers. The
//! channel task never touches dashboard state; everything lands here.

mod commands;
mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::channel::{Channel, WsChannel};
use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::logs::LogLevel;
use crate::core::state::{Settings, View};
use crate::core::view_model::ViewModel;
use crate::tui::commands::Input;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, TranscriptState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Upper bound on how long the loop sleeps waiting for keys, so channel
/// events show up promptly.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub transcript: TranscriptState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            transcript: TranscriptState::new(),
            input_box: InputBox::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is ignored by terminals that lack it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

/// Route one terminal event. Returns `Flow::Quit` when the user asked to leave.
pub(crate) fn handle_event<C: Channel>(vm: &mut ViewModel<C>, tui: &mut TuiState, event: TuiEvent) -> Flow {
    match event {
        TuiEvent::ForceQuit => return Flow::Quit,
        TuiEvent::Escape => {
            if !vm.dashboard.show_screenshot {
                return Flow::Quit;
            }
            vm.perform(Action::DismissScreenshot);
        }
        TuiEvent::SwitchView => {
            let next = vm.dashboard.view.next();
            vm.perform(Action::SwitchView(next));
        }
        TuiEvent::ToggleAgent => vm.perform(Action::ToggleAgent),
        TuiEvent::RunTool(tool) => vm.perform(Action::RunTool(tool.to_string())),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.transcript.handle_event(&event);
        }
        TuiEvent::Resize => {}
        _ => {
            if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) {
                submit_input(vm, text);
            }
        }
    }
    Flow::Continue
}

/// Turn a submitted line into dashboard actions.
fn submit_input<C: Channel>(vm: &mut ViewModel<C>, text: String) {
    match commands::parse(&text) {
        Input::Chat(text) => {
            vm.dashboard.input = text;
            vm.perform(Action::SendMessage);
        }
        Input::Tool(tool) => vm.perform(Action::RunTool(tool)),
        Input::Settings {
            agent_backend,
            llm_provider,
        } => {
            vm.dashboard.settings = Settings {
                agent_backend,
                llm_provider,
            };
            vm.perform(Action::SaveSettings);
        }
        Input::ApiKey { provider, key } => {
            *vm.dashboard.api_keys.field_mut(provider) = key;
            vm.perform(Action::SaveApiKey(provider));
        }
        Input::Browse(path) => vm.perform(Action::Browse(path)),
        Input::ToggleAgent => vm.perform(Action::ToggleAgent),
        Input::Help => {
            for line in commands::HELP_LINES {
                vm.dashboard.log(*line, LogLevel::Info);
            }
            vm.perform(Action::SwitchView(View::Terminal));
        }
        Input::Invalid(usage) => vm.dashboard.toast(usage, LogLevel::Error),
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    info!("Connecting to {}", config.server_url);
    let mut vm = ViewModel::new(WsChannel::new(config.server_url.clone()), config.settings);
    vm.init(Instant::now());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Could not enable terminal modes: {}", e))
        .ok();

    let mut needs_redraw = true; // Force first frame
    let mut toast_count = vm.dashboard.toasts.len();

    loop {
        if needs_redraw {
            let connected = vm.is_connected();
            terminal.draw(|f| ui::draw_ui(f, &vm.dashboard, connected, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = vm.next_tick_in(Instant::now()).min(IDLE_POLL);
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if handle_event(&mut vm, &mut tui, event) == Flow::Quit {
                should_quit = true;
                break;
            }
        }
        if should_quit {
            break;
        }

        if vm.pump() > 0 {
            needs_redraw = true;
        }

        vm.tick(Instant::now());
        if vm.dashboard.toasts.len() != toast_count {
            toast_count = vm.dashboard.toasts.len();
            needs_redraw = true;
        }
    }

    info!("Dashboard closing");
    ratatui::restore();
    Ok(())
}
