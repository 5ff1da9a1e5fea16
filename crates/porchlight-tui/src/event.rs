//! TUI event types for input and chat request outcomes.

use crossterm::event::KeyEvent;

/// Application event emitted by input handlers or in-flight chat requests.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event.
    Input(KeyEvent),
    /// Periodic tick event.
    Tick,
    /// Assistant reply returned by the chat service.
    Reply(String),
    /// A chat request that failed to produce a reply.
    RequestFailed(String),
    /// Scroll event in the chat view.
    Scroll(i16),
}
