use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ethers_core::types::H256;
use ratatui::{
    layout::Rect,
    prelude::Frame,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppCtx, Pending, ScreenWidget, Transition};
use crate::error::FlowError;
use crate::flows;
use crate::ui::common_nav::{edit_field, esc_to_back, move_focus};
use crate::ui::components::{draw_frame_title, field_line_text, submit_line, TextField};
use crate::ui::help::{help_busy, help_form};
use crate::ui::layout::page_layout;

const ID: usize = 0;
const OWNER: usize = 1;
const SUBMIT: usize = 2;

#[derive(Default)]
pub struct TransferScreen {
    id: TextField,
    new_owner: TextField,
    focus: usize,
    pending: Pending<Result<H256, FlowError>>,
    last_tx: Option<H256>,
}

impl TransferScreen {
    fn submit(&mut self, ctx: &mut AppCtx) {
        let notifier = ctx.notifier();
        let Ok(args) = flows::check_transfer(&notifier, &self.id.text, &self.new_owner.text) else {
            return;
        };
        let Some(registry) = ctx.registry_or_notify() else { return };
        self.pending = Pending::spawn(async move { flows::run_transfer(registry.as_ref(), &notifier, args).await });
    }
}

#[async_trait]
impl ScreenWidget for TransferScreen {
    fn title(&self) -> &str { "Transfer Asset" }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, _ctx: &AppCtx) {
        let page = page_layout(size, 3);
        let busy = self.is_busy();

        let header = Paragraph::new("Hand an asset over to a new owner address").block(draw_frame_title(self.title()));
        let mut lines = vec![
            field_line_text("Asset ID", &self.id, !busy && self.focus == ID),
            field_line_text("New Owner", &self.new_owner, !busy && self.focus == OWNER),
            Line::from(""),
            submit_line(self.focus == SUBMIT, "Transfer Asset", busy.then_some("Transferring...")),
        ];
        if let Some(tx) = &self.last_tx {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("Last transfer: tx {tx:#x}"), Style::default().fg(Color::Green))));
        }

        f.render_widget(header, page.header);
        f.render_widget(Paragraph::new(lines).block(draw_frame_title("Transfer")), page.body);
        f.render_widget(if busy { help_busy() } else { help_form() }, page.help);
    }

    fn on_tick(&mut self, _ctx: &mut AppCtx) {
        if let Some(Ok(tx)) = self.pending.poll() {
            self.last_tx = Some(tx);
            self.id.clear();
            self.new_owner.clear();
            self.focus = ID;
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
            (_, KeyCode::Enter) => self.focus += 1,
            (ID, _) => {
                edit_field(k, &mut self.id);
            }
            (OWNER, _) => {
                edit_field(k, &mut self.new_owner);
            }
            _ => {}
        }
        Ok(Transition::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{connected_ctx, settle};
    use crate::flows::tests::{FakeRegistry, SIGNER};
    use crate::types::Asset;
    use ethers_core::types::{Address, U256};
    use std::sync::Arc;

    const BOB: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    async fn transfer(screen: &mut TransferScreen, ctx: &mut AppCtx, id: &str, to: &str) {
        screen.id = TextField::with(id);
        screen.new_owner = TextField::with(to);
        screen.focus = SUBMIT;
        screen.on_key(KeyEvent::from(KeyCode::Enter), ctx).await.unwrap();
        settle(screen, ctx).await;
    }

    #[tokio::test]
    async fn bad_address_keeps_form_and_never_calls() {
        let reg = Arc::new(FakeRegistry::default());
        let mut ctx = connected_ctx(reg.clone());
        let mut screen = TransferScreen::default();

        transfer(&mut screen, &mut ctx, "1", "0x123").await;
        assert_eq!(reg.calls(), 0);
        assert_eq!(screen.new_owner.text, "0x123");
        assert_eq!(ctx.toasts.iter().next().unwrap().notice.title, "Invalid Ethereum address format");
    }

    #[tokio::test]
    async fn successful_transfer_resets_the_form() {
        let reg = FakeRegistry::default();
        reg.assets.lock().unwrap().insert(
            U256::from(3),
            Asset {
                id: U256::from(3),
                name: "Truck".into(),
                asset_type: "Vehicle".into(),
                value: U256::exp10(18),
                owner: SIGNER,
                timestamp: 0,
            },
        );
        let reg = Arc::new(reg);
        let mut ctx = connected_ctx(reg.clone());
        let mut screen = TransferScreen::default();

        transfer(&mut screen, &mut ctx, "3", BOB).await;
        assert!(screen.id.text.is_empty() && screen.new_owner.text.is_empty());
        assert!(screen.last_tx.is_some());

        let owner = reg.assets.lock().unwrap()[&U256::from(3)].owner;
        assert_eq!(owner, BOB.parse::<Address>().unwrap());
        let toast = ctx.toasts.iter().next().unwrap();
        assert_eq!(toast.notice.description.as_deref(), Some("Asset #3 transferred to 0x7099...79C8"));
    }
}
