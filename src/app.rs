use anyhow::Result;
use async_trait::async_trait;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ethers_providers::{Http, Middleware, Provider};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    prelude::Frame,
    widgets::Clear,
    Terminal,
};
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::Config;
use crate::connection::{self, Session};
use crate::contract::AssetRegistry;
use crate::defaults::Defaults;
use crate::error::ValidationError;
use crate::notify::{Notice, Notifier};
use crate::screens::{ConfirmQuitScreen, DashboardScreen};
use crate::types::ConnectionInfo;
use crate::ui::toast::{self, Toasts};
use crate::util::short_address;

pub enum Transition {
    Stay,
    Push(Box<dyn ScreenWidget>),
    Pop,
    Quit,
}

/// Result slot for one spawned call. Busy until the task reports back.
pub struct Pending<T> {
    rx: Option<oneshot::Receiver<T>>,
}

impl<T> Default for Pending<T> {
    fn default() -> Self {
        Self { rx: None }
    }
}

impl<T: Send + 'static> Pending<T> {
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let _ = tx.send(fut.await);
        });
        Self { rx: Some(rx) }
    }
}

impl<T> Pending<T> {
    pub fn is_busy(&self) -> bool {
        self.rx.is_some()
    }

    /// Non-blocking; yields the result once, then goes idle.
    pub fn poll(&mut self) -> Option<T> {
        let rx = self.rx.as_mut()?;
        match rx.try_recv() {
            Ok(v) => {
                self.rx = None;
                Some(v)
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                warn!("background task ended without a result");
                self.rx = None;
                None
            }
        }
    }
}

/// A live connection: what we learned at bootstrap, the contract handle,
/// and the block height published by the watcher.
pub struct Link {
    pub info: ConnectionInfo,
    pub registry: Arc<dyn AssetRegistry>,
    block: watch::Receiver<u64>,
    watcher: Option<JoinHandle<()>>,
}

impl Link {
    fn start<M: Middleware + 'static>(session: Session<M>) -> Self {
        let (block, watcher) =
            connection::spawn_block_watcher(session.client, session.info.block_number, Defaults::BLOCK_POLL_INTERVAL);
        Self { info: session.info, registry: session.registry, block, watcher: Some(watcher) }
    }

    /// Fixed height, no watcher.
    #[cfg(test)]
    pub fn detached(info: ConnectionInfo, registry: Arc<dyn AssetRegistry>) -> Self {
        let (_tx, block) = watch::channel(info.block_number);
        Self { info, registry, block, watcher: None }
    }

    pub fn latest_block(&self) -> u64 {
        *self.block.borrow()
    }
}

impl Drop for Link {
    fn drop(&mut self) {
        if let Some(h) = self.watcher.take() {
            h.abort();
        }
    }
}

pub struct AppCtx {
    pub config: Config,
    pub link: Option<Link>,
    pub last_error: Option<String>,
    pub toasts: Toasts,
    connecting: Pending<Result<Session<Provider<Http>>>>,
    notices: mpsc::UnboundedSender<Notice>,
    notices_rx: mpsc::UnboundedReceiver<Notice>,
}

impl AppCtx {
    pub fn new(config: Config) -> Self {
        let (notices, notices_rx) = mpsc::unbounded_channel();
        Self {
            config,
            link: None,
            last_error: None,
            toasts: Toasts::new(Defaults::TOAST_TTL, Defaults::MAX_TOASTS),
            connecting: Pending::default(),
            notices,
            notices_rx,
        }
    }

    /// Sender handed to flows; drained into toasts on every tick.
    pub fn notifier(&self) -> mpsc::UnboundedSender<Notice> {
        self.notices.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting.is_busy()
    }

    pub fn latest_block(&self) -> Option<u64> {
        self.link.as_ref().map(Link::latest_block)
    }

    /// Contract handle, or a "Contract not initialized" notice.
    pub fn registry_or_notify(&self) -> Option<Arc<dyn AssetRegistry>> {
        let registry = self.link.as_ref().map(|l| l.registry.clone());
        if registry.is_none() {
            self.notices.notify(Notice::error(ValidationError::NotConnected.to_string()));
        }
        registry
    }

    /// Drop any live link and bootstrap again in the background.
    pub fn connect(&mut self) {
        if self.connecting.is_busy() {
            return;
        }
        self.link = None;
        let cfg = self.config.clone();
        info!(rpc = %cfg.rpc_url, "connecting");
        self.connecting = Pending::spawn(async move { connection::connect(&cfg).await });
    }

    pub fn attach<M: Middleware + 'static>(&mut self, session: Session<M>) {
        self.notices.notify(
            Notice::success("Connected to private blockchain")
                .with_description(format!("Account: {}", short_address(&session.info.account))),
        );
        self.last_error = None;
        self.link = Some(Link::start(session));
    }

    pub fn tick(&mut self, now: Instant) {
        match self.connecting.poll() {
            Some(Ok(session)) => self.attach(session),
            Some(Err(err)) => {
                warn!(error = %format!("{err:#}"), "connection failed");
                self.last_error = Some(format!("{err:#}"));
                self.notices.notify(
                    Notice::error("Failed to connect to blockchain")
                        .with_description(format!("Make sure the local node is running on {}", self.config.rpc_url)),
                );
            }
            None => {}
        }
        while let Ok(notice) = self.notices_rx.try_recv() {
            self.toasts.push(notice, now);
        }
        self.toasts.expire(now);
    }
}

#[async_trait]
pub trait ScreenWidget: Send {
    fn title(&self) -> &str { "RWA Console" }
    fn draw(&self, f: &mut Frame<'_>, area: Rect, ctx: &AppCtx);

    /// Called every loop iteration for every screen on the stack.
    fn on_tick(&mut self, _ctx: &mut AppCtx) {}

    /// Overlays are drawn on top of the screen beneath them.
    fn is_overlay(&self) -> bool { false }

    /// A call is in flight; input is ignored until it settles.
    fn is_busy(&self) -> bool { false }

    async fn on_key(&mut self, key: KeyEvent, ctx: &mut AppCtx) -> Result<Transition>;
}

pub async fn run(config: Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let mut ctx = AppCtx::new(config);
    ctx.connect();
    let mut stack: Vec<Box<dyn ScreenWidget>> = vec![Box::new(DashboardScreen::default())];

    let result = event_loop(&mut terminal, &mut ctx, &mut stack).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

pub fn draw_stack(f: &mut Frame<'_>, stack: &[Box<dyn ScreenWidget>], ctx: &AppCtx) {
    let size = f.size();
    match stack {
        [] => f.render_widget(Clear, size),
        [.., below, top] if top.is_overlay() => {
            below.draw(f, size, ctx);
            top.draw(f, size, ctx);
        }
        [.., top] => top.draw(f, size, ctx),
    }
    toast::render(f, size, &ctx.toasts);
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    ctx: &mut AppCtx,
    stack: &mut Vec<Box<dyn ScreenWidget>>,
) -> Result<()> {
    loop {
        ctx.tick(Instant::now());
        for screen in stack.iter_mut() {
            screen.on_tick(ctx);
        }

        terminal.draw(|f| draw_stack(f, stack.as_slice(), ctx))?;

        if !event::poll(Defaults::TICK)? {
            continue;
        }
        let Event::Key(k) = event::read()? else { continue };
        if k.kind != KeyEventKind::Press {
            continue;
        }

        // Ctrl+Q asks to quit from anywhere.
        if k.modifiers.contains(KeyModifiers::CONTROL) && matches!(k.code, KeyCode::Char('q' | 'Q')) {
            if stack.last().map_or(true, |s| s.title() != ConfirmQuitScreen::TITLE) {
                stack.push(Box::new(ConfirmQuitScreen::new()));
            }
            continue;
        }

        let Some(top) = stack.last_mut() else { break };
        match top.on_key(k, ctx).await? {
            Transition::Stay => {}
            Transition::Push(s) => stack.push(s),
            Transition::Pop => {
                stack.pop();
                if stack.is_empty() {
                    break;
                }
            }
            Transition::Quit => break,
        }
    }
    Ok(())
}
