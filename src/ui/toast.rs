//! Transient notifications stacked in the top-right corner.

use ratatui::{
    layout::Rect,
    prelude::Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::layout::top_right_rect;
use super::style::level_color;
use crate::notify::{Notice, NoticeLevel};

const WIDTH: u16 = 48;

#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

/// Newest first, bounded, each toast lives for `ttl`.
#[derive(Debug)]
pub struct Toasts {
    items: VecDeque<Toast>,
    ttl: Duration,
    max: usize,
}

impl Toasts {
    pub fn new(ttl: Duration, max: usize) -> Self {
        Self { items: VecDeque::new(), ttl, max }
    }

    pub fn push(&mut self, notice: Notice, now: Instant) {
        self.items.push_front(Toast { notice, shown_at: now });
        self.items.truncate(self.max);
    }

    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items.retain(|t| now.saturating_duration_since(t.shown_at) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }
}

fn mark(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "ℹ",
        NoticeLevel::Success => "✓",
        NoticeLevel::Error => "✗",
    }
}

fn toast_lines(notice: &Notice, width: usize) -> Vec<Line<'static>> {
    let color = level_color(notice.level);
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", mark(notice.level)), Style::default().fg(color)),
        Span::styled(notice.title.clone(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])];
    if let Some(desc) = &notice.description {
        lines.extend(textwrap::wrap(desc, width).into_iter().map(|l| Line::from(l.into_owned())));
    }
    lines
}

pub fn render(f: &mut Frame<'_>, area: Rect, toasts: &Toasts) {
    let inner_w = WIDTH.saturating_sub(2) as usize;
    let mut y = area.y;
    for toast in toasts.iter() {
        let lines = toast_lines(&toast.notice, inner_w.max(1));
        let height = lines.len() as u16 + 2;
        if y + height > area.bottom() {
            break;
        }
        let slot = Rect { y, height: area.bottom() - y, ..area };
        let rect = top_right_rect(WIDTH, height, slot);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(level_color(toast.notice.level)));
        f.render_widget(Clear, rect);
        f.render_widget(Paragraph::new(lines).block(block), rect);
        y += height;
    }
}
