//! User-facing notices.

use std::fmt;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational notice
    Info,
    /// Something went wrong; the user can retry
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Fire-and-forget channel for user-visible messages (toasts, status lines).
pub trait Notifier: Send + Sync {
    /// Surface `message` to the user.
    fn notify(&self, message: &str, level: NoticeLevel);
}

/// Notifier that writes notices to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, level: NoticeLevel) {
        match level {
            NoticeLevel::Info => tracing::info!(notice = %message),
            NoticeLevel::Error => tracing::warn!(notice = %message),
        }
    }
}
