//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Pending** (request in flight): draws every ~80ms so the indicator pulses.
//! - **Idle**: sleeps up to 500ms, only redraws on events, replies, or resize.
//!
//! Requests run on tokio tasks. Their outcomes come back over an
//! `std::sync::mpsc` channel as `Action::ResponseReceived` and are drained
//! once per loop iteration, so `App` is only ever touched by this thread.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::backend::{ChatBackend, HttpChatBackend, OutboundRequest, dispatch};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    // Animation state for the pending indicator
    pub pulse_value: f32,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            pulse_value: 0.0,
        }
    }

    /// Copy props from the application state into components.
    pub fn sync_props(&mut self, app: &App) {
        self.input_box.disabled = app.is_pending();
        self.input_box.target_label = app.target_label();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Build the chat backend for a resolved config.
pub fn build_backend(config: &ResolvedConfig) -> Arc<dyn ChatBackend> {
    Arc::new(HttpChatBackend::new(config.endpoint.clone()))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = build_backend(&config);
    info!("Using backend '{}' at {}", backend.name(), config.endpoint);
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        tui.sync_props(&app);

        let animating = app.is_pending();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit | TuiEvent::ForceQuit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                }
                _ => match tui.input_box.handle_event(&event) {
                    Some(InputEvent::Submit(text)) => {
                        if let Effect::SpawnRequest(request) =
                            update(&mut app, Action::Submit(text))
                        {
                            spawn_request(&app, request, tx.clone());
                        }
                        // Disable the trigger before any further key in this batch
                        tui.sync_props(&app);
                    }
                    Some(InputEvent::CycleTarget) => {
                        update(&mut app, Action::CycleTarget);
                        tui.sync_props(&app);
                    }
                    Some(InputEvent::ContentChanged) | None => {}
                },
            }
            if should_quit {
                break;
            }
        }

        if should_quit {
            break Ok(());
        }

        // Handle settled requests from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            update(&mut app, action);
        }
    };

    ratatui::restore();
    result
}

fn spawn_request(app: &App, request: OutboundRequest, tx: mpsc::Sender<Action>) {
    info!(
        "Spawning chat request via '{}' (server_id={:?})",
        app.backend.name(),
        request.target
    );
    let backend = app.backend.clone();

    tokio::spawn(async move {
        let started = Instant::now();
        let outcome = dispatch(backend.as_ref(), &request).await;
        debug!(
            "Chat request settled in {}ms",
            started.elapsed().as_millis()
        );
        if tx.send(Action::ResponseReceived(outcome)).is_err() {
            warn!("Failed to send chat outcome: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn sync_props_disables_input_while_pending() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        tui.sync_props(&app);
        assert!(!tui.input_box.disabled);
        assert_eq!(tui.input_box.target_label, "none");

        update(&mut app, Action::Submit("hi".into()));
        tui.sync_props(&app);
        assert!(tui.input_box.disabled);
    }

    #[tokio::test]
    async fn spawned_request_reports_back_over_channel() {
        let mut app = test_app();
        let (tx, rx) = mpsc::channel();

        let Effect::SpawnRequest(request) = update(&mut app, Action::Submit("ping".into())) else {
            panic!("expected a spawned request");
        };
        spawn_request(&app, request, tx);

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        update(&mut app, action);

        assert!(!app.is_pending());
        let last = app.messages.last().unwrap();
        assert_eq!(last.text, "echo: ping");
    }
}
