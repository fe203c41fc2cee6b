use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    prelude::Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{AppCtx, Pending, ScreenWidget, Transition};
use crate::error::FlowError;
use crate::flows;
use crate::types::{Asset, AssetView};
use crate::ui::common_nav::{edit_field, esc_to_back, move_focus};
use crate::ui::components::{draw_frame_title, field_line_text, submit_line, TextField};
use crate::ui::help::{help_busy, help_form};
use crate::ui::layout::{page_layout, split_top};

const ID: usize = 0;
const SUBMIT: usize = 1;

#[derive(Default)]
pub struct QueryScreen {
    id: TextField,
    focus: usize,
    pending: Pending<Result<Asset, FlowError>>,
    asset: Option<AssetView>,
}

impl QueryScreen {
    fn submit(&mut self, ctx: &mut AppCtx) {
        let notifier = ctx.notifier();
        let Ok(id) = flows::check_query(&notifier, &self.id.text) else { return };
        let Some(registry) = ctx.registry_or_notify() else { return };
        self.pending = Pending::spawn(async move { flows::run_query(registry.as_ref(), &notifier, id).await });
    }

    fn card(view: &AssetView) -> Paragraph<'static> {
        let mut lines = vec![
            Line::from(Span::styled(view.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
        ];
        lines.extend(view.rows().into_iter().map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
                Span::raw(value.to_string()),
            ])
        }));
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title("Asset Details"),
        )
    }
}

#[async_trait]
impl ScreenWidget for QueryScreen {
    fn title(&self) -> &str { "Query Asset" }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, _ctx: &AppCtx) {
        let page = page_layout(size, 3);
        let (form_area, card_area) = split_top(page.body, 5);
        let busy = self.is_busy();

        let header = Paragraph::new("Look up an asset record by its ID").block(draw_frame_title(self.title()));
        let form = Paragraph::new(vec![
            field_line_text("Asset ID", &self.id, !busy && self.focus == ID),
            Line::from(""),
            submit_line(self.focus == SUBMIT, "Query Asset", busy.then_some("Querying...")),
        ])
        .block(draw_frame_title("Lookup"));

        f.render_widget(header, page.header);
        f.render_widget(form, form_area);
        if let Some(view) = &self.asset {
            f.render_widget(Self::card(view), card_area);
        }
        f.render_widget(if busy { help_busy() } else { help_form() }, page.help);
    }

    fn on_tick(&mut self, _ctx: &mut AppCtx) {
        if let Some(result) = self.pending.poll() {
            self.asset = result.ok().as_ref().map(AssetView::from);
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
            (_, KeyCode::Enter) => self.submit(ctx),
            (ID, _) => {
                edit_field(k, &mut self.id);
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
    use ethers_core::types::U256;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    async fn query(screen: &mut QueryScreen, ctx: &mut AppCtx, id: &str) {
        screen.id = TextField::with(id);
        screen.on_key(KeyEvent::from(KeyCode::Enter), ctx).await.unwrap();
        settle(screen, ctx).await;
    }

    fn registry_with_villa() -> Arc<FakeRegistry> {
        let reg = FakeRegistry::default();
        reg.assets.lock().unwrap().insert(
            U256::from(1),
            Asset {
                id: U256::from(1),
                name: "Luxury Villa".into(),
                asset_type: "Real Estate".into(),
                value: U256::exp10(18) * 5_000_000u64,
                owner: SIGNER,
                timestamp: 1_700_000_000,
            },
        );
        Arc::new(reg)
    }

    #[tokio::test]
    async fn found_asset_is_rendered_as_a_card() {
        let mut ctx = connected_ctx(registry_with_villa());
        let mut screen = QueryScreen::default();
        query(&mut screen, &mut ctx, "1").await;

        let view = screen.asset.clone().unwrap();
        assert_eq!(view.value_usd, "$5,000,000");

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| screen.draw(f, f.size(), &ctx)).unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Luxury Villa"));
        assert!(text.contains("$5,000,000"));
    }

    #[tokio::test]
    async fn failed_lookup_clears_the_card() {
        let reg = registry_with_villa();
        let mut ctx = connected_ctx(reg.clone());
        let mut screen = QueryScreen::default();
        query(&mut screen, &mut ctx, "1").await;
        assert!(screen.asset.is_some());

        query(&mut screen, &mut ctx, "99").await;
        assert!(screen.asset.is_none());
        assert_eq!(reg.calls(), 2);
        assert_eq!(ctx.toasts.iter().next().unwrap().notice.title, "Failed to query asset");
    }

    #[tokio::test]
    async fn non_numeric_id_never_calls() {
        let reg = registry_with_villa();
        let mut ctx = connected_ctx(reg.clone());
        let mut screen = QueryScreen::default();
        query(&mut screen, &mut ctx, "abc").await;
        assert_eq!(reg.calls(), 0);
        assert_eq!(ctx.toasts.iter().next().unwrap().notice.title, "Asset ID must be a whole number");
    }
}
