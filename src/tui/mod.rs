// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks, fetch outcomes)
// - Rendering the storefront and reporting marker visibility after each frame

pub mod app;
pub mod components;
pub mod input;
pub mod layout;
pub mod modal;
pub mod scroll;
pub mod traits;
pub mod views;

use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::storefront::Intent;
use anyhow::{Context, Result};
use app::{App, Channels};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use scroll::FocusablePanel;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use traits::Handled;

/// Run the TUI
///
/// Sets up the terminal, mounts the storefront, runs the event loop and
/// restores the terminal when done.
pub async fn run_tui(
    config: Config,
    log_buffer: LogBuffer,
    catalog: Arc<dyn CatalogSource>,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (mut app, mut channels) = App::new(&config, log_buffer, catalog);
    app.mount();

    let result = run_event_loop(&mut terminal, &mut app, &mut channels).await;
    app.unmount();

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Each iteration draws a frame, lets the sentinel look at the marker that
/// frame produced, then waits for whichever comes first:
/// 1. Keyboard or mouse input
/// 2. A timer tick (spinner animation)
/// 3. A fetch outcome
/// 4. An intent sent from outside a component (the sentinel's LoadNext)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    channels: &mut Channels,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(120));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        // The frame is on screen: apply any load request it triggered now,
        // before the next frame can observe the same marker again
        if app.poll_sentinel() {
            drain_intents(app, channels);
        }

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(outcome) = channels.outcomes.recv() => {
                app.apply_outcome(outcome);
            }

            Some(intent) = channels.intents.recv() => {
                app.dispatch(intent);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn drain_intents(app: &mut App, channels: &mut Channels) {
    while let Ok(intent) = channels.intents.try_recv() {
        app.dispatch(intent);
    }
}

/// Handle keyboard input
/// Layered dispatch: Modal → Search text → Global → Enter on grid → Component
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, &key_event) {
        return;
    }

    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return;
    }
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Layer 2: Typing goes straight to the search box, never debounced,
    // and global letter keys do not apply while it has focus
    if app.is_focused(FocusablePanel::Search) && is_text_input(&key_event) {
        app.dispatch_to_focused(key_event);
        return;
    }

    let key = key_event.code;
    if !app.handle_key_press(key) {
        return;
    }

    // Layer 3: Global keys
    if handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 4: Enter on the grid opens the product modal
    if key == KeyCode::Enter && app.is_focused(FocusablePanel::Grid) {
        app.open_selected_product();
        return;
    }

    // Layer 5: Focused component
    if app.dispatch_to_focused(key_event) == Handled::No && key == KeyCode::Esc {
        // Nothing left to clear in the panel: Esc returns to the grid
        app.focus(FocusablePanel::Grid);
    }
}

fn is_text_input(key_event: &KeyEvent) -> bool {
    let plain = !key_event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key_event.code {
        KeyCode::Char(_) => plain,
        KeyCode::Backspace => true,
        _ => false,
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if app.modal.is_some() {
        return;
    }
    match mouse_event.kind {
        MouseEventKind::ScrollUp => app.scroll_grid(false),
        MouseEventKind::ScrollDown => app.scroll_grid(true),
        _ => {}
    }
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    // Always process Release events to keep InputHandler in sync
    // Without this, keys get stuck in "pressed" state after modal closes
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return true;
    }

    if key_event.kind != KeyEventKind::Press {
        return true;
    }

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::Emit(intent) => {
            if app.handle_key_press(key_event.code) {
                app.modal = None;
                app.dispatch(intent);
            }
        }
    }

    true
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            true
        }
        KeyCode::Char('?') => {
            app.modal = Some(Modal::help());
            true
        }
        KeyCode::Tab => {
            app.focus_next();
            true
        }
        KeyCode::BackTab => {
            app.focus_prev();
            true
        }
        KeyCode::Char('/') => {
            app.focus(FocusablePanel::Search);
            true
        }
        KeyCode::Char('i') => {
            app.dispatch(Intent::SignIn);
            true
        }
        _ => false,
    }
}
