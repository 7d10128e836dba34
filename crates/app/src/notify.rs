//! Notifications
//!
//! Views report every user-visible outcome as a [`Notification`]. The CLI emits them as tracing
//! events; tests record them to assert on what a user would have been shown.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::{Arc, Mutex, PoisonError},
};

use tracing::{error, info};

/// Styling of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Informational or success message.
    #[default]
    Default,

    /// Failure message.
    Destructive,
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short headline
    pub title: String,

    /// Optional detail
    pub description: Option<String>,

    /// Styling
    pub variant: Variant,
}

impl Notification {
    /// A success notification.
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            description: Some(description.into()),
            variant: Variant::Default,
        }
    }

    /// A destructive notification titled "Error".
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: Some(description.into()),
            variant: Variant::Destructive,
        }
    }

    /// A destructive notification with a title and no description.
    pub fn failure(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            variant: Variant::Destructive,
        }
    }

    /// Whether this notification reports a failure.
    pub fn is_destructive(&self) -> bool {
        self.variant == Variant::Destructive
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.description {
            Some(description) => write!(f, "{}: {description}", self.title),
            None => f.write_str(&self.title),
        }
    }
}

/// Sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    /// Show a notification.
    fn notify(&self, notification: Notification);
}

/// Emits notifications as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            Variant::Default => info!(target: "invoicer::notify", "{notification}"),
            Variant::Destructive => error!(target: "invoicer::notify", "{notification}"),
        }
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Notifications received so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
