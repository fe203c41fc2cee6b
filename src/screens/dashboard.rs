use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    prelude::Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::connection::network_name;
use crate::screens::{ConfirmQuitScreen, QueryScreen, TokenizeScreen, TransferScreen};
use crate::ui::components::{draw_frame_title, info_line};
use crate::ui::help::help_menu;
use crate::ui::layout::{page_layout, split_top};
use crate::ui::style::status_badge;
use crate::util::{addr_to_0x, short_address};

const ITEMS: [&str; 5] = ["Tokenize Asset", "Query Asset", "Transfer Asset", "Reconnect", "Quit"];

#[derive(Default)]
pub struct DashboardScreen {
    selected: usize,
}

impl DashboardScreen {
    fn status_lines(ctx: &AppCtx) -> Vec<Line<'static>> {
        let dash = || Span::raw("—");
        let link = ctx.link.as_ref();
        let network = match link {
            Some(l) => format!("{} (chain {}, {})", l.info.rpc_url, l.info.chain_id, network_name(l.info.chain_id)),
            None => ctx.config.rpc_url.clone(),
        };
        vec![
            info_line("Blockchain Status", status_badge(ctx.is_connected(), ctx.is_connecting())),
            info_line(
                "Latest Block",
                ctx.latest_block().map(|n| Span::raw(format!("#{n}"))).unwrap_or_else(dash),
            ),
            info_line(
                "Account",
                link.map(|l| Span::raw(short_address(&l.info.account))).unwrap_or_else(dash),
            ),
            info_line(
                "Contract",
                link.map(|l| Span::raw(addr_to_0x(&l.info.contract))).unwrap_or_else(dash),
            ),
            info_line("Network", Span::raw(network)),
        ]
    }

    fn setup_lines(ctx: &AppCtx) -> Vec<Line<'static>> {
        let code = |s: &'static str| Span::styled(s, Style::default().fg(Color::Cyan));
        let mut lines = vec![
            Line::from("Make sure you have:"),
            Line::from(vec![Span::raw("  1. Started a local node: "), code("npx hardhat node")]),
            Line::from(vec![Span::raw("  2. Deployed the contract: "), code("rwa deploy")]),
            Line::from(Span::styled(
                format!("     (address read from {})", ctx.config.address_file().display()),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(vec![Span::raw("Then choose "), code("Reconnect"), Span::raw(" (or press r).")]),
        ];
        if let Some(err) = &ctx.last_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("Last error: {err}"), Style::default().fg(Color::DarkGray))));
        }
        lines
    }
}

#[async_trait]
impl ScreenWidget for DashboardScreen {
    fn title(&self) -> &str { "RWA Tokenization" }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, ctx: &AppCtx) {
        let page = page_layout(size, 4);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(self.title().to_string(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
            Line::from(Span::styled("Real-World Asset DApp • Private Blockchain", Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, page.header);

        let (status_area, rest) = split_top(page.body, 7);
        f.render_widget(
            Paragraph::new(Self::status_lines(ctx)).block(draw_frame_title("Connection")),
            status_area,
        );

        let menu_area = if ctx.is_connected() {
            rest
        } else {
            let hint_h = if ctx.last_error.is_some() { 9 } else { 7 };
            let (hints, menu) = split_top(rest, hint_h);
            let alert = Paragraph::new(Self::setup_lines(ctx))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red))
                        .title("Blockchain Not Connected"),
                );
            f.render_widget(alert, hints);
            menu
        };

        let items: Vec<ListItem> = ITEMS.iter().map(|s| ListItem::new(*s)).collect();
        let list = List::new(items)
            .block(draw_frame_title("Actions"))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("➤ ");
        let mut state = ListState::default();
        state.select(Some(self.selected));
        f.render_stateful_widget(list, menu_area, &mut state);

        f.render_widget(help_menu(), page.help);
    }

    async fn on_key(&mut self, k: KeyEvent, ctx: &mut AppCtx) -> Result<Transition> {
        match k.code {
            KeyCode::Up => self.selected = if self.selected == 0 { ITEMS.len() - 1 } else { self.selected - 1 },
            KeyCode::Down | KeyCode::Tab => self.selected = (self.selected + 1) % ITEMS.len(),
            KeyCode::Char('r' | 'R') => ctx.connect(),
            KeyCode::Enter => {
                return Ok(match self.selected {
                    0 => Transition::Push(Box::new(TokenizeScreen::default())),
                    1 => Transition::Push(Box::new(QueryScreen::default())),
                    2 => Transition::Push(Box::new(TransferScreen::default())),
                    3 => {
                        ctx.connect();
                        Transition::Stay
                    }
                    _ => Transition::Push(Box::new(ConfirmQuitScreen::new())),
                });
            }
            _ => {}
        }
        Ok(Transition::Stay)
    }
}
