//! Library entry point for the Porchlight chat console.
//!
//! Provides a reusable [`run`] function that launches the Ratatui chat
//! console against a running Porchlight service.

mod app;
mod client;
mod event;
mod ui;

use anyhow::anyhow;
use app::App;
use client::ChatClient;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode, KeyEvent,
    KeyModifiers, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use event::AppEvent;
use log::{debug, error, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Launch the chat console against the service at `endpoint`.
///
/// The caller is responsible for initializing logging (e.g. `env_logger`)
/// before calling `run`.
///
/// # Errors
/// Returns an error if terminal setup or the event loop fails.
pub async fn run(endpoint: String) -> anyhow::Result<()> {
    let client = Arc::new(ChatClient::new(endpoint.clone()));
    info!("console session opened (session_id={})", client.session_id());

    let mut app = App::new(client.session_id().clone());
    app.endpoint = endpoint;

    let mut terminal = setup_terminal()?;
    let (tx, mut rx) = mpsc::channel(256);
    spawn_input_handler(tx.clone());
    spawn_tick(tx.clone());

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;
        let event = rx
            .recv()
            .await
            .ok_or_else(|| anyhow!("event channel closed unexpectedly"))?;
        if handle_app_event(event, &client, &mut app, tx.clone()) {
            break;
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}

/// Dispatch a UI event and return true when the app should exit.
fn handle_app_event(
    event: AppEvent,
    client: &Arc<ChatClient>,
    app: &mut App,
    sender: mpsc::Sender<AppEvent>,
) -> bool {
    match event {
        AppEvent::Input(key) => return handle_input(key, client, app, sender),
        AppEvent::Reply(reply) => {
            debug!("reply received (len={})", reply.len());
            app.apply_reply(reply);
        }
        AppEvent::RequestFailed(cause) => {
            error!("chat request failed: {}", cause);
            app.apply_send_failure();
        }
        AppEvent::Scroll(delta) => {
            if delta < 0 {
                app.scroll_up((-delta) as u16);
            } else if delta > 0 {
                app.scroll_down(delta as u16);
            }
        }
        AppEvent::Tick => app.on_tick(),
    }
    false
}

/// Handle keyboard input and dispatch actions. Returns true to exit.
fn handle_input(
    key: KeyEvent,
    client: &Arc<ChatClient>,
    app: &mut App,
    sender: mpsc::Sender<AppEvent>,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::PageUp => app.scroll_up(5),
        KeyCode::PageDown => app.scroll_down(5),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::Home => app.scroll_to_top(),
        KeyCode::End => app.enable_auto_scroll(),
        KeyCode::Enter => submit_message(client, app, sender),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                app.input.push(ch);
            }
        }
        _ => {}
    }
    false
}

/// Start a submission from the input buffer, if it has content.
fn submit_message(client: &Arc<ChatClient>, app: &mut App, sender: mpsc::Sender<AppEvent>) {
    let Some(message) = app.begin_submission() else {
        return;
    };
    info!(
        "sending message (session_id={}, len={})",
        client.session_id(),
        message.len()
    );
    spawn_send(client.clone(), message, sender);
}

/// Spawn a task to post one message asynchronously.
///
/// Submissions are not serialized: each Enter spawns its own task and
/// completions land in whatever order the service answers.
fn spawn_send(client: Arc<ChatClient>, message: String, sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        match client.send(&message).await {
            Ok(reply) => {
                let _ = sender.send(AppEvent::Reply(reply)).await;
            }
            Err(err) => {
                let _ = sender.send(AppEvent::RequestFailed(err.to_string())).await;
            }
        }
    });
}

/// Spawn a task to poll for input events.
fn spawn_input_handler(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        const MOUSE_SCROLL_LINES: i16 = 3;
        loop {
            if matches!(crossterm::event::poll(Duration::from_millis(30)), Ok(true)) {
                while matches!(crossterm::event::poll(Duration::from_millis(0)), Ok(true)) {
                    let event = match crossterm::event::read() {
                        Ok(event) => event,
                        Err(_) => break,
                    };
                    match event {
                        CrosstermEvent::Key(key) => {
                            let _ = sender.send(AppEvent::Input(key)).await;
                        }
                        CrosstermEvent::Mouse(mouse) => match mouse.kind {
                            MouseEventKind::ScrollUp => {
                                let lines = if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                                    MOUSE_SCROLL_LINES.saturating_mul(2)
                                } else {
                                    MOUSE_SCROLL_LINES
                                };
                                let _ = sender.send(AppEvent::Scroll(-lines)).await;
                            }
                            MouseEventKind::ScrollDown => {
                                let lines = if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                                    MOUSE_SCROLL_LINES.saturating_mul(2)
                                } else {
                                    MOUSE_SCROLL_LINES
                                };
                                let _ = sender.send(AppEvent::Scroll(lines)).await;
                            }
                            _ => {}
                        },
                        _ => {}
                    }
                }
            }
        }
    });
}

/// Spawn a periodic tick event generator.
fn spawn_tick(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(250));
        loop {
            interval.tick().await;
            let _ = sender.send(AppEvent::Tick).await;
        }
    });
}

/// Configure terminal in raw mode with alternate screen.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal state on exit.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    debug!("restoring terminal");
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
