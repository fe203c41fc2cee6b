//! User-facing notifications. Flows emit [`Notice`]s; the TUI turns them into
//! toasts, the CLI prints them.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, title: title.into(), description: None }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, title: title.into(), description: None }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title: title.into(), description: None }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// TUI side: the event loop drains the receiver into the toast list.
impl Notifier for UnboundedSender<Notice> {
    fn notify(&self, notice: Notice) {
        // Receiver only goes away on shutdown.
        let _ = self.send(notice);
    }
}

/// CLI side: one line per notice on stdout, mirrored into the log.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let (mark, detail) = (
            match notice.level {
                NoticeLevel::Info => "…",
                NoticeLevel::Success => "✓",
                NoticeLevel::Error => "✗",
            },
            notice.description.as_deref().map(|d| format!(" ({d})")).unwrap_or_default(),
        );
        if notice.level == NoticeLevel::Error {
            warn!(description = ?notice.description, "{}", notice.title);
            eprintln!("{mark} {}{detail}", notice.title);
        } else {
            info!(description = ?notice.description, "{}", notice.title);
            println!("{mark} {}{detail}", notice.title);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every notice for assertions.
    #[derive(Default)]
    pub(crate) struct Collected(pub Mutex<Vec<Notice>>);

    impl Collected {
        pub(crate) fn all(&self) -> Vec<Notice> {
            self.0.lock().unwrap().clone()
        }

        pub(crate) fn last(&self) -> Option<Notice> {
            self.0.lock().unwrap().last().cloned()
        }
    }

    impl Notifier for Collected {
        fn notify(&self, notice: Notice) {
            self.0.lock().unwrap().push(notice);
        }
    }

    #[test]
    fn channel_notifier_forwards() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        tx.notify(Notice::success("done").with_description("Asset ID: 1"));
        let got = rx.try_recv().unwrap();
        assert_eq!(got.level, NoticeLevel::Success);
        assert_eq!(got.description.as_deref(), Some("Asset ID: 1"));
    }
}
