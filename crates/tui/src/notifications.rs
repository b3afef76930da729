//! Notification surface for alerts raised by background tasks.
//!
//! Alerts queue in arrival order and at most `limit` of them are visible at
//! once; the rest wait behind the visible ones. Sticky alerts stay until the
//! operator dismisses them, auto-closing alerts expire after a fixed lifetime.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use care_inbox_types::Alert;

/// Number of alerts shown at once.
pub const DEFAULT_VISIBLE_LIMIT: usize = 1;
/// Lifetime of an auto-closing alert once it becomes visible.
pub const AUTO_CLOSE_AFTER: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
struct Notification {
    alert: Alert,
    shown_at: Option<Instant>,
}

#[derive(Debug)]
pub struct NotificationCenter {
    queue: VecDeque<Notification>,
    limit: usize,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBLE_LIMIT)
    }
}

impl NotificationCenter {
    pub fn new(limit: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Queue an alert. It becomes visible immediately when a slot is free.
    pub fn push(&mut self, alert: Alert, now: Instant) {
        self.queue.push_back(Notification { alert, shown_at: None });
        self.mark_visible(now);
    }

    /// Alerts currently on screen, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Alert> {
        self.queue.iter().take(self.limit).map(|n| &n.alert)
    }

    /// Alerts waiting for a visible slot.
    pub fn pending_count(&self) -> usize {
        self.queue.len().saturating_sub(self.limit)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Remove the oldest visible alert and return it.
    pub fn dismiss_front(&mut self, now: Instant) -> Option<Alert> {
        let dismissed = self.queue.pop_front().map(|n| n.alert);
        self.mark_visible(now);
        dismissed
    }

    /// Remove every queued alert equal to `alert` and return how many went.
    pub fn dismiss_matching(&mut self, alert: &Alert, now: Instant) -> usize {
        let before = self.queue.len();
        self.queue.retain(|n| n.alert != *alert);
        self.mark_visible(now);
        before - self.queue.len()
    }

    /// Drop visible auto-closing alerts whose lifetime has passed. Returns
    /// `true` when anything changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.queue.len();
        let mut index = 0;
        while index < self.queue.len().min(self.limit) {
            let expired = self.queue[index].alert.auto_close
                && self.queue[index]
                    .shown_at
                    .is_some_and(|shown| now.saturating_duration_since(shown) >= AUTO_CLOSE_AFTER);
            if expired {
                self.queue.remove(index);
                self.mark_visible(now);
            } else {
                index += 1;
            }
        }
        before != self.queue.len()
    }

    fn mark_visible(&mut self, now: Instant) {
        for notification in self.queue.iter_mut().take(self.limit) {
            notification.shown_at.get_or_insert(now);
        }
    }
}
