//! Application state for the Porchlight chat console.

use log::debug;
use porchlight_protocol::SessionId;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use std::cmp::min;

/// Fixed transcript text shown when a chat request fails for any reason.
pub const SEND_FAILED_TEXT: &str = "Error: Could not reach the server.";

const TYPING_FRAMES: [&str; 4] = ["", ".", "..", "..."];

/// Chat roles displayed in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// Message typed by the user.
    User,
    /// Reply from the assistant service.
    Bot,
}

/// Single chat entry rendered in the transcript.
#[derive(Debug, Clone)]
pub struct ChatEntry {
    /// Role that produced the message.
    pub role: ChatRole,
    /// Message content.
    pub content: String,
}

/// Top-level application state for the chat console.
pub struct App {
    /// Session identifier shown in the header and sent with every request.
    pub session_id: SessionId,
    /// Service endpoint shown in the header.
    pub endpoint: String,
    /// Chat transcript entries.
    pub messages: Vec<ChatEntry>,
    /// Current input buffer.
    pub input: String,
    /// Whether at least one chat request is in flight.
    pub loading: bool,
    /// Current scroll offset.
    pub scroll: u16,
    /// Whether to auto-scroll to the bottom.
    pub auto_scroll: bool,
    /// Maximum scroll offset for the chat view.
    pub chat_max_scroll: u16,
    typing_frame: usize,
}

impl App {
    /// Create a new application state for one console session.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            endpoint: String::new(),
            messages: Vec::new(),
            input: String::new(),
            loading: false,
            scroll: 0,
            auto_scroll: true,
            chat_max_scroll: 0,
            typing_frame: 0,
        }
    }

    /// Take the current input and start a submission.
    ///
    /// Trims the input first; a whitespace-only buffer is left untouched and
    /// nothing starts. Otherwise the trimmed text is echoed into the
    /// transcript, the input clears, and the typing indicator turns on.
    pub fn begin_submission(&mut self) -> Option<String> {
        let message = self.input.trim().to_string();
        if message.is_empty() {
            return None;
        }
        debug!("submission started (len={})", message.len());
        self.input.clear();
        self.push_user_message(message.clone());
        self.loading = true;
        Some(message)
    }

    /// Record a successful reply and stop the typing indicator.
    pub fn apply_reply(&mut self, reply: String) {
        self.push_bot_message(reply);
        self.loading = false;
    }

    /// Record a failed request as the fixed error message.
    ///
    /// Every failure class collapses to the same transcript text; the cause
    /// only reaches the log.
    pub fn apply_send_failure(&mut self) {
        self.push_bot_message(SEND_FAILED_TEXT.to_string());
        self.loading = false;
    }

    /// Append a user-authored message and pin the view to the newest entry.
    pub fn push_user_message(&mut self, content: String) {
        self.messages.push(ChatEntry {
            role: ChatRole::User,
            content,
        });
        self.enable_auto_scroll();
    }

    /// Append an assistant message and pin the view to the newest entry.
    pub fn push_bot_message(&mut self, content: String) {
        self.messages.push(ChatEntry {
            role: ChatRole::Bot,
            content,
        });
        self.enable_auto_scroll();
    }

    /// Advance the typing indicator animation.
    pub fn on_tick(&mut self) {
        if self.loading {
            self.typing_frame = self.typing_frame.wrapping_add(1);
        }
    }

    /// Scroll the chat view upward by a number of lines.
    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Scroll the chat view downward by a number of lines.
    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = min(self.scroll.saturating_add(lines), self.chat_max_scroll);
        if self.scroll >= self.chat_max_scroll {
            self.auto_scroll = true;
        }
    }

    /// Scroll to the top of the chat view.
    pub fn scroll_to_top(&mut self) {
        self.auto_scroll = false;
        self.scroll = 0;
    }

    /// Enable auto-scrolling to the bottom.
    pub fn enable_auto_scroll(&mut self) {
        self.auto_scroll = true;
        self.scroll = self.chat_max_scroll;
    }

    /// Update scroll bounds after layout changes.
    ///
    /// Snaps to the new bottom only when auto-scroll is on or the view was
    /// already sitting at the exact bottom, so a reader who has scrolled up
    /// even a single line stays put.
    pub fn update_scroll_bounds(&mut self, max_scroll: u16) {
        let was_at_bottom = self.scroll >= self.chat_max_scroll;
        self.chat_max_scroll = max_scroll;
        if self.auto_scroll || was_at_bottom {
            self.scroll = max_scroll;
            self.auto_scroll = true;
        } else {
            self.scroll = self.scroll.min(max_scroll);
        }
    }

    /// Render chat messages into styled lines for the UI.
    pub fn render_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if self.messages.is_empty() && !self.loading {
            lines.push(Line::from(Span::styled(
                " No messages yet. Type below to ask about a unit.",
                Style::default().fg(Color::Rgb(128, 128, 128)),
            )));
            return lines;
        }

        for entry in &self.messages {
            push_entry_lines(&mut lines, entry);
            lines.push(Line::from(Span::raw("")));
        }

        if self.loading {
            let dots = TYPING_FRAMES[self.typing_frame % TYPING_FRAMES.len()];
            lines.push(Line::from(Span::styled(
                badge_text(ChatRole::Bot),
                badge_style(ChatRole::Bot),
            )));
            lines.push(Line::from(Span::styled(
                format!(" typing{dots}"),
                Style::default().fg(Color::Rgb(128, 128, 128)),
            )));
            lines.push(Line::from(Span::raw("")));
        }

        lines
    }
}

/// Render one transcript entry as a role badge line plus its content lines.
fn push_entry_lines(lines: &mut Vec<Line<'static>>, entry: &ChatEntry) {
    lines.push(Line::from(Span::styled(
        badge_text(entry.role),
        badge_style(entry.role),
    )));
    let content_style = Style::default().fg(Color::Rgb(238, 238, 238));
    for line in entry.content.lines() {
        lines.push(Line::from(Span::styled(format!(" {line}"), content_style)));
    }
}

fn badge_text(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => " you ",
        ChatRole::Bot => " bot ",
    }
}

fn badge_style(role: ChatRole) -> Style {
    let bg = match role {
        ChatRole::User => Color::Rgb(107, 161, 230),
        ChatRole::Bot => Color::Rgb(224, 160, 58),
    };
    Style::default()
        .fg(Color::Rgb(10, 10, 10))
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn console() -> App {
        App::new(SessionId::from("k3j9x0q2m7d1p5"))
    }

    #[test]
    fn submission_echoes_trimmed_input_and_shows_typing() {
        let mut app = console();
        app.input = "  two bedrooms please  ".to_string();
        let sent = app.begin_submission();
        assert_eq!(sent.as_deref(), Some("two bedrooms please"));
        assert_eq!(app.input, "");
        assert!(app.loading);
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].role, ChatRole::User);
        assert_eq!(app.messages[0].content, "two bedrooms please");
    }

    #[test]
    fn whitespace_only_submission_is_ignored() {
        let mut app = console();
        app.input = "   \t".to_string();
        assert_eq!(app.begin_submission(), None);
        assert_eq!(app.input, "   \t");
        assert!(!app.loading);
        assert!(app.messages.is_empty());
    }

    #[test]
    fn reply_lands_as_bot_message_and_stops_typing() {
        let mut app = console();
        app.input = "hi".to_string();
        app.begin_submission();
        app.apply_reply("Hi! What's your name?".to_string());
        assert!(!app.loading);
        assert_eq!(app.messages.last().map(|m| m.role), Some(ChatRole::Bot));
        assert_eq!(
            app.messages.last().map(|m| m.content.as_str()),
            Some("Hi! What's your name?")
        );
    }

    #[test]
    fn failure_lands_as_the_fixed_error_message() {
        let mut app = console();
        app.input = "hi".to_string();
        app.begin_submission();
        app.apply_send_failure();
        assert!(!app.loading);
        assert_eq!(app.messages.last().map(|m| m.role), Some(ChatRole::Bot));
        assert_eq!(
            app.messages.last().map(|m| m.content.as_str()),
            Some(SEND_FAILED_TEXT)
        );
    }

    #[test]
    fn first_completed_submission_hides_the_typing_indicator() {
        // Two submissions can be in flight at once; whichever finishes
        // first turns the indicator off.
        let mut app = console();
        app.input = "first".to_string();
        app.begin_submission();
        app.input = "second".to_string();
        app.begin_submission();
        assert!(app.loading);
        app.apply_reply("answer to the second".to_string());
        assert!(!app.loading);
        app.apply_reply("answer to the first".to_string());
        assert!(!app.loading);
        assert_eq!(app.messages.len(), 4);
    }

    #[test]
    fn appended_messages_pin_the_view_to_the_bottom() {
        let mut app = console();
        app.update_scroll_bounds(40);
        app.scroll_up(10);
        assert!(!app.auto_scroll);
        app.push_bot_message("fresh".to_string());
        assert!(app.auto_scroll);
        assert_eq!(app.scroll, app.chat_max_scroll);
    }

    #[test]
    fn manual_scroll_survives_new_bounds() {
        let mut app = console();
        app.update_scroll_bounds(40);
        app.scroll_up(10);
        app.update_scroll_bounds(50);
        assert_eq!(app.scroll, 30);
        assert!(!app.auto_scroll);
    }
}
