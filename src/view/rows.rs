//! Transcript row rendering.
//!
//! Each entry renders to a fixed-height block of lines: one header line,
//! the entry's text lines, and one trailing blank separator. Long lines are
//! truncated to the viewport width (display columns, not bytes), never
//! wrapped, so the height here always matches `state::row_height`.

use crate::model::{ChatEntry, Role};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthChar;

/// Render an entry to its full row of lines.
pub fn render_entry(entry: &ChatEntry, width: u16) -> Text<'static> {
    let mut lines = Vec::with_capacity(entry.text_line_count() + 2);
    lines.push(header_line(entry));

    let body_style = Style::default();
    let mut pushed_body = false;
    for raw in entry.text().lines() {
        lines.push(Line::from(Span::styled(
            truncate_to_width(raw, width as usize),
            body_style,
        )));
        pushed_body = true;
    }
    // `lines()` yields nothing for an empty string, but the row still
    // occupies one body line.
    if !pushed_body {
        lines.push(Line::default());
    }

    lines.push(Line::default());
    Text::from(lines)
}

/// Header line: role label, entry id, timestamp.
pub fn header_line(entry: &ChatEntry) -> Line<'static> {
    let role_style = match entry.role() {
        Role::User => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        Role::Assistant => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    };

    Line::from(vec![
        Span::styled(entry.role().label().to_string(), role_style),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", entry.id()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(" {}", entry.timestamp().format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Truncate a string to at most `width` display columns.
///
/// Splits on column width rather than byte or char count so wide glyphs
/// (CJK, emoji) never overflow the viewport.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    let mut columns = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if columns + ch_width > width {
            break;
        }
        columns += ch_width;
        out.push(ch);
    }
    out
}
