use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

use super::style;

/// Single-line text input. `cursor` is a byte offset, always on a char boundary.
#[derive(Clone, Default, Debug)]
pub struct TextField {
    pub text: String,
    pub cursor: usize,
}

impl TextField {
    pub fn with(text: &str) -> Self {
        Self { text: text.into(), cursor: text.len() }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.text.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) { self.cursor = 0; }
    pub fn end(&mut self) { self.cursor = self.text.len(); }
}

pub fn draw_frame_title(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

/// `< Submit >`, or the progress label greyed out while a call is in flight.
pub fn submit_line(focused: bool, label: &'static str, busy_label: Option<&'static str>) -> Line<'static> {
    match busy_label {
        Some(busy) => Line::from(style::button_spans_disabled(busy)),
        None => Line::from(style::button_spans(label, focused)),
    }
}

// Block cursor over the current char, no shifting.
pub fn field_line_text<'a>(label: &str, field: &TextField, focused: bool) -> Line<'a> {
    let label_span = Span::styled(format!("{label}: "), Style::default().fg(Color::Yellow));
    let text = field.text.as_str();

    if !focused {
        return Line::from(vec![label_span, Span::raw(text.to_string())]);
    }

    let (left, rest) = text.split_at(field.cursor.min(text.len()));
    let block = |s: &str| {
        Span::styled(
            s.to_string(),
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };

    match rest.chars().next() {
        Some(ch) => Line::from(vec![
            label_span,
            Span::raw(left.to_string()),
            block(&ch.to_string()),
            Span::raw(rest[ch.len_utf8()..].to_string()),
        ]),
        None => Line::from(vec![label_span, Span::raw(left.to_string()), block(" ")]),
    }
}

/// `Label: ‹ Choice ›` selector cycled with ←/→.
pub fn choice_field_line<'a>(label: &str, choice: &str, focused: bool) -> Line<'a> {
    let arrows = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Yellow)),
        Span::styled("‹ ", arrows),
        Span::styled(choice.to_string(), value),
        Span::styled(" ›", arrows),
    ])
}

/// Dim `label: value` row for read-only panels.
pub fn info_line<'a>(label: &str, value: impl Into<Span<'a>>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        value.into(),
    ])
}
