//! User-facing outcome notifications.
//!
//! [`NotificationSink`] is the delivery mechanism the store talks to; it is
//! fire-and-forget and the store never consumes a return value. [`TracingNotificationSink`]
//! forwards notifications to tracing for headless surfaces.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// A user-facing notification: severity, short title, message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Fire-and-forget sink for user-facing notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// Sink that forwards notifications to tracing (info/error by severity).
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => info!(
                title = %notification.title,
                message = %notification.message,
                "Notification"
            ),
            Severity::Error => error!(
                title = %notification.title,
                message = %notification.message,
                "Notification"
            ),
        }
    }
}
