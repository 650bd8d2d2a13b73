//! End-of-phase notification seam.
//!
//! The core only decides *when* a notification fires; rendering it (sound,
//! desktop popup) belongs to the embedding application.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    FocusEnd,
    BreakEnd,
}

/// Fire-and-forget notification sink. Failures are swallowed by
/// implementations -- the signature has nothing to report.
pub trait NotificationSink {
    fn notify(&self, kind: NotificationKind);
}

/// Sink that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn notify(&self, _kind: NotificationKind) {}
}
