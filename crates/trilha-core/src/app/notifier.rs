//! NotificationCenter - single-slot ephemeral message channel.
//!
//! No queueing: a `show` while another message is visible replaces it and the
//! replaced message is lost. Each `show` arms a fixed-duration auto-dismiss
//! timer; a generation counter keeps a stale timer from hiding a newer
//! message.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::domain::notification::{Notification, Severity};

/// Nominal auto-dismiss delay.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(3000);

struct Slot {
    current: Notification,
    generation: u64,
}

#[derive(Clone)]
pub struct NotificationCenter {
    slot: Arc<Mutex<Slot>>,
    dismiss_after: Duration,
}

impl NotificationCenter {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                current: Notification::hidden(),
                generation: 0,
            })),
            dismiss_after,
        }
    }

    /// Overwrite the slot and force visibility, then arm the dismiss timer.
    pub async fn show(&self, message: impl Into<String>, severity: Severity) {
        let generation = {
            let mut slot = self.slot.lock().await;
            slot.generation += 1;
            slot.current = Notification {
                message: message.into(),
                severity,
                visible: true,
            };
            slot.generation
        };

        let slot = Arc::clone(&self.slot);
        let dismiss_after = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            let mut slot = slot.lock().await;
            // 古いタイマーは新しいメッセージに触らない
            if slot.generation == generation {
                slot.current.visible = false;
            }
        });
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.show(message, Severity::Success).await;
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.show(message, Severity::Error).await;
    }

    /// Explicit user dismissal.
    pub async fn hide(&self) {
        self.slot.lock().await.current.visible = false;
    }

    pub async fn snapshot(&self) -> Notification {
        self.slot.lock().await.current.clone()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}
