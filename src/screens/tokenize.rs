use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    prelude::Frame,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppCtx, Pending, ScreenWidget, Transition};
use crate::contract::Tokenized;
use crate::error::FlowError;
use crate::flows;
use crate::types::AssetType;
use crate::ui::common_nav::{edit_field, esc_to_back, move_focus};
use crate::ui::components::{choice_field_line, draw_frame_title, field_line_text, submit_line, TextField};
use crate::ui::help::{help_busy, help_form};
use crate::ui::layout::page_layout;

const NAME: usize = 0;
const TYPE: usize = 1;
const VALUE: usize = 2;
const SUBMIT: usize = 3;

#[derive(Default)]
pub struct TokenizeScreen {
    name: TextField,
    asset_type: Option<AssetType>,
    value: TextField,
    focus: usize,
    pending: Pending<Result<Tokenized, FlowError>>,
    last_id: Option<String>,
}

impl TokenizeScreen {
    fn reset(&mut self) {
        self.name.clear();
        self.asset_type = None;
        self.value.clear();
        self.focus = NAME;
    }

    fn cycle_type(&mut self, forward: bool) {
        self.asset_type = Some(match (self.asset_type, forward) {
            (Some(t), true) => t.next(),
            (Some(t), false) => t.prev(),
            (None, true) => AssetType::ALL[0],
            (None, false) => AssetType::ALL[AssetType::ALL.len() - 1],
        });
    }

    fn submit(&mut self, ctx: &mut AppCtx) {
        let notifier = ctx.notifier();
        let asset_type = self.asset_type.map(|t| t.label()).unwrap_or("");
        let Ok(args) = flows::check_tokenize(&notifier, &self.name.text, asset_type, &self.value.text) else {
            return;
        };
        let Some(registry) = ctx.registry_or_notify() else { return };
        self.pending = Pending::spawn(async move { flows::run_tokenize(registry.as_ref(), &notifier, args).await });
    }
}

#[async_trait]
impl ScreenWidget for TokenizeScreen {
    fn title(&self) -> &str { "Tokenize Asset" }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, _ctx: &AppCtx) {
        let page = page_layout(size, 3);

        let header = Paragraph::new("Create a new on-chain record for a real-world asset")
            .block(draw_frame_title(self.title()));

        let busy = self.is_busy();
        let type_label = self.asset_type.map(|t| t.label()).unwrap_or("Select asset type");
        let mut lines = vec![
            field_line_text("Asset Name", &self.name, !busy && self.focus == NAME),
            choice_field_line("Asset Type", type_label, !busy && self.focus == TYPE),
            field_line_text("Value (USD)", &self.value, !busy && self.focus == VALUE),
            Line::from(""),
            submit_line(self.focus == SUBMIT, "Tokenize Asset", busy.then_some("Tokenizing...")),
        ];
        if let Some(id) = &self.last_id {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("Last tokenized: Asset ID {id}"), Style::default().fg(Color::Green))));
        }

        f.render_widget(header, page.header);
        f.render_widget(Paragraph::new(lines).block(draw_frame_title("Asset Details")), page.body);
        f.render_widget(if busy { help_busy() } else { help_form() }, page.help);
    }

    fn on_tick(&mut self, _ctx: &mut AppCtx) {
        if let Some(Ok(done)) = self.pending.poll() {
            self.last_id = Some(done.asset_id.map(|id| id.to_string()).unwrap_or_else(|| "N/A".to_string()));
            self.reset();
        }
    }

    fn is_busy(&self) -> bool {
        self.pending.is_busy()
    }

    async fn on_key(&mut self, k: KeyEvent, ctx: &mut AppCtx) -> Result<Transition> {
        if self.is_busy() {
            return Ok(Transition::Stay);
        }
        if let Some(t) = esc_to_back(k) {
            return Ok(t);
        }
        if move_focus(k, &mut self.focus, SUBMIT + 1) {
            return Ok(Transition::Stay);
        }
        match (self.focus, k.code) {
            (SUBMIT, KeyCode::Enter) => self.submit(ctx),
            (TYPE, KeyCode::Right | KeyCode::Char(' ')) => self.cycle_type(true),
            (TYPE, KeyCode::Left) => self.cycle_type(false),
            (NAME | VALUE, KeyCode::Enter) => self.focus += 1,
            (TYPE, KeyCode::Enter) => self.focus = VALUE,
            (NAME, _) => {
                edit_field(k, &mut self.name);
            }
            (VALUE, _) => {
                edit_field(k, &mut self.value);
            }
            _ => {}
        }
        Ok(Transition::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{connected_ctx, settle, test_config};
    use crate::flows::tests::FakeRegistry;
    use crate::notify::NoticeLevel;
    use ethers_core::types::U256;
    use std::sync::Arc;
    use std::time::Instant;

    async fn press(screen: &mut TokenizeScreen, ctx: &mut AppCtx, code: KeyCode) {
        screen.on_key(KeyEvent::from(code), ctx).await.unwrap();
    }

    async fn type_text(screen: &mut TokenizeScreen, ctx: &mut AppCtx, s: &str) {
        for c in s.chars() {
            press(screen, ctx, KeyCode::Char(c)).await;
        }
    }

    async fn fill(screen: &mut TokenizeScreen, ctx: &mut AppCtx, name: &str, value: &str) {
        type_text(screen, ctx, name).await;
        press(screen, ctx, KeyCode::Down).await;
        press(screen, ctx, KeyCode::Right).await;
        press(screen, ctx, KeyCode::Down).await;
        type_text(screen, ctx, value).await;
        press(screen, ctx, KeyCode::Down).await;
    }

    #[tokio::test]
    async fn empty_form_is_rejected_locally() {
        let reg = Arc::new(FakeRegistry::default());
        let mut ctx = connected_ctx(reg.clone());
        let mut screen = TokenizeScreen::default();

        press(&mut screen, &mut ctx, KeyCode::BackTab).await;
        assert_eq!(screen.focus, SUBMIT);
        press(&mut screen, &mut ctx, KeyCode::Enter).await;
        ctx.tick(Instant::now());

        assert!(!screen.is_busy());
        assert_eq!(reg.calls(), 0);
        assert_eq!(ctx.toasts.iter().next().unwrap().notice.title, "Please enter asset name");
    }

    #[tokio::test]
    async fn success_resets_the_form() {
        let reg = Arc::new(FakeRegistry::default());
        let mut ctx = connected_ctx(reg.clone());
        let mut screen = TokenizeScreen::default();

        fill(&mut screen, &mut ctx, "Luxury Villa", "5000000").await;
        assert_eq!(screen.asset_type, Some(AssetType::RealEstate));
        press(&mut screen, &mut ctx, KeyCode::Enter).await;
        assert!(screen.is_busy());

        // Input is ignored while the call is in flight.
        press(&mut screen, &mut ctx, KeyCode::Esc).await;

        settle(&mut screen, &mut ctx).await;
        assert_eq!(reg.calls(), 1);
        assert!(screen.name.text.is_empty() && screen.value.text.is_empty());
        assert_eq!(screen.asset_type, None);
        assert_eq!(screen.last_id.as_deref(), Some("1"));

        let stored = reg.assets.lock().unwrap().get(&U256::from(1)).cloned().unwrap();
        assert_eq!(stored.asset_type, "Real Estate");
        let last = ctx.toasts.iter().next().unwrap();
        assert_eq!(last.notice.level, NoticeLevel::Success);
    }

    #[tokio::test]
    async fn failure_keeps_the_form() {
        let reg = Arc::new(FakeRegistry {
            fail_with: Some(crate::error::RemoteError::reverted("Not authorized")),
            ..Default::default()
        });
        let mut ctx = connected_ctx(reg.clone());
        let mut screen = TokenizeScreen::default();

        fill(&mut screen, &mut ctx, "Painting", "12.5").await;
        press(&mut screen, &mut ctx, KeyCode::Enter).await;
        settle(&mut screen, &mut ctx).await;

        assert_eq!(screen.name.text, "Painting");
        assert_eq!(screen.value.text, "12.5");
        let last = ctx.toasts.iter().next().unwrap();
        assert_eq!(last.notice.title, "Failed to tokenize asset");
        assert_eq!(last.notice.description.as_deref(), Some("Not authorized"));
    }

    #[tokio::test]
    async fn valid_form_without_contract_is_not_submitted() {
        let mut ctx = AppCtx::new(test_config());
        let mut screen = TokenizeScreen::default();

        fill(&mut screen, &mut ctx, "Truck", "900").await;
        press(&mut screen, &mut ctx, KeyCode::Enter).await;
        ctx.tick(Instant::now());

        assert!(!screen.is_busy());
        assert_eq!(ctx.toasts.iter().next().unwrap().notice.title, "Contract not initialized");
    }
}
