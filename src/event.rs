//! Events emitted by the scanner.
//!
//! Two streams: a structured log stream for operator-facing sinks and an
//! unlock stream for notification layers. Delivery is broadcast and
//! best-effort — a lagging or dropped subscriber can never back up the
//! worker loop, because subscribers only ever hold a receiver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::model::Creator;

/// Severity of a scanner log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// A structured log line from the scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub severity: Severity,
    /// Component tag, e.g. "scanner".
    pub component: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// A trophy newly unlocked for a creator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockEvent {
    pub creator: Creator,
    pub trophy_id: String,
    pub trophy_name: String,
    /// Hidden trophies get their description obscured by renderers.
    pub hidden: bool,
    pub unlocked_at: DateTime<Utc>,
}

/// Fan-out point for both event streams.
pub struct EventChannel {
    logs: broadcast::Sender<LogEvent>,
    unlocks: broadcast::Sender<UnlockEvent>,
}

impl EventChannel {
    pub(crate) fn new(capacity: usize) -> Self {
        let (logs, _) = broadcast::channel(capacity);
        let (unlocks, _) = broadcast::channel(capacity);
        Self { logs, unlocks }
    }

    /// Subscribe to the log stream. Each receiver sees every event sent
    /// after the call.
    pub fn subscribe_logs(&self) -> broadcast::Receiver<LogEvent> {
        self.logs.subscribe()
    }

    /// Subscribe to the unlock stream.
    pub fn subscribe_unlocks(&self) -> broadcast::Receiver<UnlockEvent> {
        self.unlocks.subscribe()
    }

    /// Publish a log event, mirrored onto `tracing`. Send errors mean
    /// "no subscribers" and are ignored.
    pub(crate) fn log(&self, severity: Severity, component: &str, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Debug => tracing::debug!(component, "{message}"),
            Severity::Info => tracing::info!(component, "{message}"),
            Severity::Warn => tracing::warn!(component, "{message}"),
            Severity::Error => tracing::error!(component, "{message}"),
        }
        let _ = self.logs.send(LogEvent {
            severity,
            component: component.to_string(),
            message,
            timestamp: Utc::now(),
        });
    }

    /// Publish an unlock event.
    pub(crate) fn unlock(&self, event: UnlockEvent) {
        tracing::info!(
            creator = %event.creator.name,
            trophy = %event.trophy_id,
            "trophy unlocked"
        );
        let _ = self.unlocks.send(event);
    }
}
