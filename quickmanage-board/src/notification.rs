//! User-facing notifications for failures the user should hear about.
//!
//! Failed saves happen in the background and failed imports leave the board
//! untouched, so neither has a return value the user would see. They are
//! broadcast here instead; any number of subscribers may listen.

use crate::error::BoardError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

const CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Broadcasts notifications to every subscriber
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Log and broadcast. Having no subscribers is fine.
    pub fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => info!(message = %notification.message, "notification"),
            NotificationLevel::Error => error!(message = %notification.message, "notification"),
        }
        let _ = self.sender.send(notification);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Notification::error(message));
    }

    /// Broadcast a failed `action` if the user should hear about it.
    ///
    /// Returns whether a notification was sent.
    pub fn report(&self, action: &str, err: &BoardError) -> bool {
        if !err.is_user_visible() {
            debug!(action, error = %err, "not notifying");
            return false;
        }
        self.error(format!("{action}: {err}"));
        true
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive() {
        let notifier = Notifier::new();
        let mut first = notifier.subscribe();
        let mut second = notifier.subscribe();

        notifier.error("save failed");

        let got = first.recv().await.unwrap();
        assert!(got.is_error());
        assert_eq!(got.message, "save failed");
        assert_eq!(second.recv().await.unwrap().message, "save failed");
    }

    #[tokio::test]
    async fn test_report_only_user_visible_errors() {
        let notifier = Notifier::new();
        let mut notifications = notifier.subscribe();

        assert!(!notifier.report("Could not save the board", &BoardError::WriterClosed));
        assert!(notifier.report(
            "Import failed",
            &BoardError::invalid_document("missing columns")
        ));

        let got = notifications.recv().await.unwrap();
        assert!(got.is_error());
        assert_eq!(got.message, "Import failed: invalid board document: missing columns");
        assert!(notifications.try_recv().is_err());
    }

    #[test]
    fn test_notify_without_subscribers() {
        Notifier::new().notify(Notification::info("nobody listening"));
    }
}
