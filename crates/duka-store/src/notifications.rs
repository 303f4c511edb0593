//! # Notification Log
//!
//! Append-only feed of system events (low stock, sale complete, sync
//! complete) consumed by UI badges. Newest first, truncated to the most
//! recent [`duka_core::NOTIFICATION_RETENTION`] entries.

use chrono::Utc;
use duka_core::{Notification, NotificationKind, NOTIFICATION_RETENTION};
use uuid::Uuid;

/// The bounded notification feed.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        NotificationLog::default()
    }

    pub fn restore(entries: Vec<Notification>) -> Self {
        NotificationLog { entries }
    }

    /// Appends an unread entry at the front and enforces retention.
    /// Returns the minted id.
    pub fn push(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        self.entries.insert(
            0,
            Notification {
                id: id.clone(),
                kind,
                title: title.into(),
                message: message.into(),
                read: false,
                timestamp: Utc::now(),
            },
        );
        self.entries.truncate(NOTIFICATION_RETENTION);
        id
    }

    /// Marks one entry as read. Unknown ids are ignored.
    pub fn mark_read(&mut self, id: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|n| n.id == id) {
            entry.read = true;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Feed entries, newest first.
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
