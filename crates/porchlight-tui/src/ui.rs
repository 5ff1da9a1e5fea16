//! Rendering routines for the Porchlight chat console.

use crate::app::App;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

// ── Theme colors (dark mode) ──────────────────────────────────────────

const PRIMARY: Color = Color::Rgb(224, 160, 58); // #E0A03A
const SECONDARY: Color = Color::Rgb(236, 196, 120); // #ECC478
const TEXT: Color = Color::Rgb(238, 238, 238); // #eeeeee
const TEXT_MUTED: Color = Color::Rgb(128, 128, 128); // #808080
const BORDER: Color = Color::Rgb(60, 60, 60); // #3c3c3c

const HEADER_HEIGHT: u16 = 7; // 5 inner lines + 2 border lines

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HERO_ART: [&str; 2] = [
    " █▀▀█ █▀▀█ █▀▀▄ █▀▀▀ █ █ █   █ █▀▀▀ █ █ ▀█▀",
    " █▀▀▀ █▄▄█ █▀▄▀ █▄▄▄ █▀█ █▄▄ █ █▄▀█ █▀█  █ ",
];

/// Draw the entire console frame.
pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // header bar
            Constraint::Min(0),                // chat
            Constraint::Length(3),             // input
            Constraint::Length(1),             // status bar
        ])
        .split(area);

    draw_header(frame, app, root[0]);
    draw_chat(frame, app, root[1]);
    draw_input(frame, app, root[2]);
    draw_status_bar(frame, app, root[3]);
}

/// Draw the header with the banner, a short prompt, and session info.
fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_style = Style::default().fg(TEXT_MUTED);
    let value_style = Style::default().fg(TEXT);
    let art_style = Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line<'_>> = Vec::new();

    // ASCII art banner — version on the last line, to the right
    for (i, art_line) in HERO_ART.iter().enumerate() {
        if i == HERO_ART.len() - 1 {
            lines.push(Line::from(vec![
                Span::styled(*art_line, art_style),
                Span::styled(format!("  v{VERSION}"), label_style),
            ]));
        } else {
            lines.push(Line::from(Span::styled(*art_line, art_style)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Ask about open units and book a tour.",
        value_style,
    )));
    lines.push(Line::from(vec![
        Span::styled("  server ", label_style),
        Span::styled(app.endpoint.as_str(), value_style),
        Span::styled("  session ", label_style),
        Span::styled(app.session_id.to_string(), value_style),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draw the chat transcript with border and scrollbar.
fn draw_chat(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let lines = app.render_lines();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER))
        .title(Span::styled(" Chat ", Style::default().fg(TEXT_MUTED)));

    let inner = block.inner(area);
    let content_width = inner.width.saturating_sub(1); // -1 for scrollbar
    let content_height = inner.height as usize;

    // Use ratatui's own line_count to get the exact wrapped line total,
    // avoiding any mismatch with a hand-written wrap estimator.
    let total_lines = Paragraph::new(lines.clone())
        .wrap(Wrap { trim: false })
        .line_count(content_width)
        .max(1);

    let max_scroll = total_lines.saturating_sub(content_height) as u16;
    app.update_scroll_bounds(max_scroll);
    let scroll = app.scroll;

    let chat_inner = Rect {
        width: inner.width.saturating_sub(1),
        ..inner
    };

    let chat = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(block, area);
    frame.render_widget(chat, chat_inner);

    if total_lines > content_height {
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(total_lines)
            .position(scroll as usize)
            .viewport_content_length(content_height);
        let scrollbar_area = Rect {
            x: inner.x + inner.width.saturating_sub(1),
            y: inner.y,
            width: 1,
            height: inner.height,
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(Style::default().fg(BORDER))
                .thumb_style(Style::default().fg(TEXT_MUTED)),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

/// Draw the input box with border and cursor.
fn draw_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(SECONDARY))
        .title(Span::styled(" Message ", Style::default().fg(SECONDARY)));

    let inner = block.inner(area);

    let prompt_style = Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD);
    let input_text = if app.input.is_empty() {
        Line::from(vec![
            Span::styled(" ", prompt_style),
            Span::styled("Type a message...", Style::default().fg(TEXT_MUTED)),
        ])
    } else {
        Line::from(vec![
            Span::styled(" ", prompt_style),
            Span::styled(app.input.as_str(), Style::default().fg(TEXT)),
        ])
    };

    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(input_text), inner);

    // Position cursor after input text
    frame.set_cursor_position((inner.x + 2 + app.input.len() as u16, inner.y));
}

/// Draw the status bar at the bottom.
fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let (status, status_color) = if app.loading {
        ("sending", PRIMARY)
    } else {
        ("idle", TEXT_MUTED)
    };

    let shortcuts = vec![
        Span::styled(" Ctrl+C", Style::default().fg(TEXT_MUTED)),
        Span::styled(" quit", Style::default().fg(BORDER)),
        Span::styled("  Enter", Style::default().fg(TEXT_MUTED)),
        Span::styled(" send", Style::default().fg(BORDER)),
        Span::styled("  PgUp/PgDn", Style::default().fg(TEXT_MUTED)),
        Span::styled(" scroll", Style::default().fg(BORDER)),
        Span::styled("  Home/End", Style::default().fg(TEXT_MUTED)),
        Span::styled(" jump", Style::default().fg(BORDER)),
    ];

    let right_text = format!(" {status} ");
    let right_len = right_text.len() as u16;
    let left_area = Rect {
        width: area.width.saturating_sub(right_len),
        ..area
    };
    let right_area = Rect {
        x: area.x + area.width.saturating_sub(right_len),
        width: right_len,
        ..area
    };

    let left = Paragraph::new(Line::from(shortcuts));
    let right = Paragraph::new(Line::from(Span::styled(
        right_text,
        Style::default().fg(status_color),
    )));

    frame.render_widget(left, left_area);
    frame.render_widget(right, right_area);
}
