//! Bounded per-worktree notification log.

use crate::surface::SurfaceId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Identifier of a notification within one worktree session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification:{}", self.0)
    }
}

/// A desktop notification emitted by a surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    /// Surface that emitted it; None once that surface is torn down
    pub surface_id: Option<SurfaceId>,
    pub title: String,
    pub body: String,
    pub is_read: bool,
}

/// Ordered log that evicts its oldest entry when full
#[derive(Debug, Clone)]
pub struct NotificationLog {
    entries: VecDeque<Notification>,
    capacity: usize,
    next_id: u64,
}

impl NotificationLog {
    /// Capacity is at least one entry
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    /// Append an unread notification and return its id
    pub fn push(&mut self, surface: SurfaceId, title: String, body: String) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        self.entries.push_back(Notification {
            id,
            surface_id: Some(surface),
            title,
            body,
            is_read: false,
        });
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                log::debug!("Evicted {} from full notification log", evicted.id);
            }
        }
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.is_read).count()
    }

    /// Mark one notification read. Returns false if it is not in the log.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.entries {
            n.is_read = true;
        }
    }

    /// Mark everything from `surface` read. Returns how many changed.
    pub fn mark_surface_read(&mut self, surface: SurfaceId) -> usize {
        let mut changed = 0;
        for n in &mut self.entries {
            if n.surface_id == Some(surface) && !n.is_read {
                n.is_read = true;
                changed += 1;
            }
        }
        changed
    }

    /// Remove a notification. Returns false if it is not in the log.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    /// Drop references to a torn-down surface
    pub fn detach_surface(&mut self, surface: SurfaceId) {
        for n in &mut self.entries {
            if n.surface_id == Some(surface) {
                n.surface_id = None;
            }
        }
    }
}

impl super::WorktreeSession {
    /// Record a desktop notification from one of this session's surfaces
    pub(super) fn receive_notification(&mut self, surface: SurfaceId, title: String, body: String) {
        if !self.notifications_enabled {
            crate::debug_log!("NOTIFY", "Notifications disabled, dropping {:?}", title);
            return;
        }
        let id = self
            .notifications
            .push(surface, title.clone(), body.clone());
        if !self.selected {
            self.has_unseen_notification = true;
        }
        crate::debug_info!("NOTIFY", "{} received {}", self.worktree.id, id);
        self.emit(super::SessionEvent::NotificationReceived { title, body });
    }

    pub fn mark_notification_read(&mut self, id: NotificationId) -> bool {
        let found = self.notifications.mark_read(id);
        if found && self.notifications.unread_count() == 0 {
            self.has_unseen_notification = false;
        }
        found
    }

    pub fn mark_all_notifications_read(&mut self) {
        self.notifications.mark_all_read();
        self.has_unseen_notification = false;
    }

    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        let found = self.notifications.dismiss(id);
        if found && self.notifications.unread_count() == 0 {
            self.has_unseen_notification = false;
        }
        found
    }

    /// Turning notifications off also clears the unseen flag
    pub fn set_notifications_enabled(&mut self, enabled: bool) {
        self.notifications_enabled = enabled;
        if !enabled {
            self.has_unseen_notification = false;
        }
    }
}
