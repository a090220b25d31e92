//! Transient user notices
//!
//! The single side-channel every screen reports through: one notice
//! per caught error (carrying the store's message verbatim) and one
//! per successful mutation. The embedding UI drains the receiver and
//! renders toasts; the core never blocks on it.

use tokio::sync::mpsc;

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Cloneable sender half shared by every page model.
#[derive(Clone)]
pub struct NoticeSink {
    tx: mpsc::UnboundedSender<Notice>,
}

impl NoticeSink {
    /// Create a sink and the receiver the UI drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    fn push(&self, level: NoticeLevel, message: String) {
        if self.tx.send(Notice { level, message }).is_err() {
            // Receiver gone; the message has nowhere to go
            tracing::debug!("notice dropped, receiver closed");
        }
    }
}
