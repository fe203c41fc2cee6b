use ratatui::{
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::style::{span_key, span_sep, span_text};

fn bar(line: Line<'static>) -> Paragraph<'static> {
    Paragraph::new(line).block(Block::default().borders(Borders::ALL)).wrap(Wrap { trim: true })
}

pub fn help_menu() -> Paragraph<'static> {
    bar(Line::from(vec![
        span_key("↑/↓/Tab"), span_text(" Navigate"), span_sep(),
        span_key("Enter"), span_text(" Select"), span_sep(),
        span_key("r"), span_text(" Reconnect"), span_sep(),
        span_key("Ctrl+Q"), span_text(" Quit"),
    ]))
}

pub fn help_form() -> Paragraph<'static> {
    bar(Line::from(vec![
        span_key("↑/↓/Tab"), span_text(" Move"), span_sep(),
        span_key("Enter"), span_text(" Submit (on button)"), span_sep(),
        span_key("←/→/Home/End"), span_text(" Cursor / Choice"), span_sep(),
        span_key("Backspace/Delete"), span_text(" Edit"), span_sep(),
        span_key("Esc"), span_text(" Back"), span_sep(),
        span_key("Ctrl+Q"), span_text(" Quit"),
    ]))
}

pub fn help_busy() -> Paragraph<'static> {
    bar(Line::from(vec![
        span_text("Waiting for the node..."), span_sep(),
        span_key("Ctrl+Q"), span_text(" Quit"),
    ]))
}
