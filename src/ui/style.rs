use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};
use std::borrow::Cow;

use crate::notify::NoticeLevel;

pub fn span_key(s: &'static str) -> Span<'static> {
    Span::styled(s, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}
pub fn span_sep() -> Span<'static> {
    Span::styled("  |  ", Style::default().fg(Color::DarkGray))
}
pub fn span_text(s: &'static str) -> Span<'static> {
    Span::raw(s)
}

const ACCENT_BRACKET: Color = Color::Blue;
const SELECTED_TEXT: Color = Color::Red;
const IDLE_TEXT: Color = Color::Blue;

/// "< " + LABEL + " >"
pub fn button_spans<S: Into<Cow<'static, str>>>(label: S, selected: bool) -> Vec<Span<'static>> {
    vec![
        Span::styled("< ", Style::default().fg(ACCENT_BRACKET).add_modifier(Modifier::BOLD)),
        Span::styled(
            label.into(),
            Style::default()
                .fg(if selected { SELECTED_TEXT } else { IDLE_TEXT })
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" >", Style::default().fg(ACCENT_BRACKET).add_modifier(Modifier::BOLD)),
    ]
}

pub fn button_spans_disabled<S: Into<Cow<'static, str>>>(label: S) -> Vec<Span<'static>> {
    vec![
        Span::styled("< ", Style::default().fg(Color::DarkGray)),
        Span::styled(label.into(), Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC)),
        Span::styled(" >", Style::default().fg(Color::DarkGray)),
    ]
}

pub fn level_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Error => Color::Red,
    }
}

pub fn status_badge(connected: bool, connecting: bool) -> Span<'static> {
    let (label, color) = match (connected, connecting) {
        (true, _) => ("Connected", Color::Green),
        (false, true) => ("Connecting...", Color::Yellow),
        (false, false) => ("Disconnected", Color::Red),
    };
    Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
}
