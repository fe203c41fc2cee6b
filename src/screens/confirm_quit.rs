use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    prelude::Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::ui::layout::centered_rect_abs;
use crate::ui::style;

const MESSAGE: &str = "Quit the RWA console?";
const STAY: &str = "Don't Quit";
const QUIT: &str = "Quit";

pub struct ConfirmQuitScreen {
    quit_selected: bool,
}

impl ConfirmQuitScreen {
    pub const TITLE: &'static str = "Confirm";

    pub fn new() -> Self {
        Self { quit_selected: false }
    }
}

impl Default for ConfirmQuitScreen {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl ScreenWidget for ConfirmQuitScreen {
    fn title(&self) -> &str { Self::TITLE }

    fn is_overlay(&self) -> bool { true }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, ctx: &AppCtx) {
        // "< " + label + " >"
        let btn_len = |label: &str| 4 + label.len();
        let buttons_len = btn_len(STAY) + 3 + btn_len(QUIT);

        let busy_note = ctx.is_connecting().then_some("(still connecting to the node)");
        let inner_width = (MESSAGE.len().max(buttons_len) as u16).max(36);
        let inner_height = 4;
        let area = centered_rect_abs(inner_width + 4, inner_height + 3, size);
        let inner = area.inner(&Margin { horizontal: 2, vertical: 1 });

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1); 4])
            .split(inner);

        let mut buttons = style::button_spans(STAY, !self.quit_selected);
        buttons.push(Span::raw("   "));
        buttons.extend(style::button_spans(QUIT, self.quit_selected));

        f.render_widget(Clear, area);
        f.render_widget(Block::default().borders(Borders::ALL).title(self.title()), area);
        f.render_widget(Paragraph::new(MESSAGE).alignment(Alignment::Center), rows[0]);
        if let Some(note) = busy_note {
            f.render_widget(Paragraph::new(note).alignment(Alignment::Center), rows[1]);
        }
        f.render_widget(Paragraph::new(Line::from(buttons)).alignment(Alignment::Center), rows[3]);
    }

    async fn on_key(&mut self, k: KeyEvent, _ctx: &mut AppCtx) -> Result<Transition> {
        match k.code {
            KeyCode::Esc => return Ok(Transition::Pop),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char(' ') => {
                self.quit_selected = !self.quit_selected;
            }
            KeyCode::Char('y' | 'Y') => return Ok(Transition::Quit),
            KeyCode::Char('n' | 'N') => return Ok(Transition::Pop),
            KeyCode::Enter => {
                return Ok(if self.quit_selected { Transition::Quit } else { Transition::Pop });
            }
            _ => {}
        }
        Ok(Transition::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_config;

    #[tokio::test]
    async fn defaults_to_staying() {
        let mut ctx = AppCtx::new(test_config());
        let mut screen = ConfirmQuitScreen::new();
        let t = screen.on_key(KeyEvent::from(KeyCode::Enter), &mut ctx).await.unwrap();
        assert!(matches!(t, Transition::Pop));

        screen.on_key(KeyEvent::from(KeyCode::Right), &mut ctx).await.unwrap();
        let t = screen.on_key(KeyEvent::from(KeyCode::Enter), &mut ctx).await.unwrap();
        assert!(matches!(t, Transition::Quit));
    }
}
