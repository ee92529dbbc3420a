//! Notification seam
//!
//! Operations that tell a person about something (rental confirmations,
//! fines, profile changes) go through a [`Notifier`]. Delivery is
//! synchronous and best effort: a failure is reported to the caller, which
//! logs it and carries on.

use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::error::{NotifyError, NotifyResult};

/// A message addressed to one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Recipient address (email)
    pub recipient: String,
    /// Subject line
    pub subject: String,
    /// Plain text body
    pub body: String,
}

impl Notification {
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Delivery channel for notifications
pub trait Notifier: Send + Sync {
    /// Deliver one notification
    fn send(&self, notification: &Notification) -> NotifyResult<()>;
}

/// Notifier that writes every notification to the log
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, notification: &Notification) -> NotifyResult<()> {
        if notification.recipient.trim().is_empty() {
            return Err(NotifyError {
                recipient: notification.recipient.clone(),
                reason: "empty recipient".to_string(),
            });
        }

        info!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            "Notification sent"
        );
        Ok(())
    }
}

/// Notifier that keeps every notification in memory.
///
/// Used by tests to assert on what would have been sent; `failing` makes
/// every delivery fail.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
    failing: bool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose deliveries always fail
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    /// Notifications delivered so far
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for MemoryNotifier {
    fn send(&self, notification: &Notification) -> NotifyResult<()> {
        if self.failing {
            return Err(NotifyError {
                recipient: notification.recipient.clone(),
                reason: "delivery disabled".to_string(),
            });
        }

        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
        Ok(())
    }
}
