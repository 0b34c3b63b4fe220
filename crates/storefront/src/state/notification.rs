//! Transient notification state.
//!
//! Holds at most one notification. Showing a new one replaces the previous
//! message and restarts the auto-dismiss timer; nothing is queued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use boutique_core::Severity;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long a notification stays open unless told otherwise.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

/// The current notification.
///
/// After an auto-dismiss or [`Notifications::hide`] the message and severity
/// are kept so the presentation layer can animate the exit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub open: bool,
    pub message: String,
    pub severity: Severity,
}

/// Notification state container.
///
/// Owns the single auto-dismiss timer. The timer is cancelled before a new
/// one is scheduled, on [`hide`](Self::hide), and when the container is
/// dropped. A generation counter guards against a timer that already woke up
/// when it was cancelled.
#[derive(Debug)]
pub struct Notifications {
    state: Arc<watch::Sender<Notification>>,
    generation: Arc<AtomicU64>,
    timer: Mutex<Option<JoinHandle<()>>>,
    default_duration: Duration,
}

impl Notifications {
    /// Create a closed notification container.
    ///
    /// `default_duration` is used by [`show`](Self::show); zero disables
    /// auto-dismiss.
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        let (state, _) = watch::channel(Notification::default());
        Self {
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            timer: Mutex::new(None),
            default_duration,
        }
    }

    /// Show `message` for the default duration.
    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        self.show_for(message, severity, self.default_duration);
    }

    /// Show `message`, closing it after `duration`.
    ///
    /// A zero `duration` keeps the notification open until
    /// [`hide`](Self::hide) or the next `show`.
    pub fn show_for(&self, message: impl Into<String>, severity: Severity, duration: Duration) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = timer.take() {
            pending.abort();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let message = message.into();
        tracing::debug!(%severity, message = %message, ?duration, "Showing notification");
        self.state.send_replace(Notification {
            open: true,
            message,
            severity,
        });

        if duration.is_zero() {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime available, notification will not auto-dismiss");
            return;
        };

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        *timer = Some(runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            state.send_if_modified(|notification| {
                if current.load(Ordering::SeqCst) != generation || !notification.open {
                    return false;
                }
                notification.open = false;
                true
            });
        }));
    }

    /// Close the notification immediately.
    pub fn hide(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = timer.take() {
            pending.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);

        self.state.send_if_modified(|notification| {
            let was_open = notification.open;
            notification.open = false;
            was_open
        });
    }

    /// Snapshot of the current notification.
    #[must_use]
    pub fn current(&self) -> Notification {
        self.state.borrow().clone()
    }

    /// Whether a notification is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    /// Subscribe to notification changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Notification> {
        self.state.subscribe()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl Drop for Notifications {
    fn drop(&mut self) {
        let timer = self
            .timer
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = timer.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    async fn advance(ms: u32) {
        tokio::time::sleep(MS * ms).await;
        tokio::task::yield_now().await;
    }

    #[test]
    fn test_starts_closed() {
        let notifications = Notifications::default();
        assert_eq!(notifications.current(), Notification::default());
        assert!(!notifications.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_keeps_message() {
        let notifications = Notifications::default();
        notifications.show_for("saved", Severity::Success, MS * 3000);
        assert!(notifications.is_open());

        advance(2999).await;
        assert!(notifications.is_open());

        advance(2).await;
        let current = notifications.current();
        assert!(!current.open);
        assert_eq!(current.message, "saved");
        assert_eq!(current.severity, Severity::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_show_restarts_timer() {
        let notifications = Notifications::default();
        notifications.show_for("saved", Severity::Success, MS * 3000);

        advance(1000).await;
        notifications.show_for("updated", Severity::Info, MS * 3000);

        // The first timer would have fired at 3000ms
        advance(2500).await;
        assert!(notifications.is_open());
        assert_eq!(notifications.current().message, "updated");

        // 1000 + 3000
        advance(501).await;
        assert!(!notifications.is_open());
        assert_eq!(notifications.current().message, "updated");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_never_dismisses() {
        let notifications = Notifications::default();
        notifications.show_for("sticky", Severity::Warning, Duration::ZERO);

        advance(60_000).await;
        assert!(notifications.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_uses_default_duration() {
        let notifications = Notifications::new(MS * 500);
        notifications.show("hello", Severity::Info);

        advance(499).await;
        assert!(notifications.is_open());
        advance(2).await;
        assert!(!notifications.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hide_closes_and_cancels_timer() {
        let notifications = Notifications::default();
        notifications.show_for("first", Severity::Error, MS * 3000);
        notifications.hide();
        assert!(!notifications.is_open());
        assert_eq!(notifications.current().message, "first");

        // A sticky notification shown after hide must not be closed by the
        // cancelled timer.
        notifications.show_for("second", Severity::Info, Duration::ZERO);
        advance(5000).await;
        assert!(notifications.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let notifications = Notifications::default();
        let mut rx = notifications.subscribe();
        notifications.show_for("bye", Severity::Info, MS * 1000);
        drop(notifications);

        advance(2000).await;
        // The sender is gone and no dismiss was published after the drop.
        assert!(rx.borrow().open);
        assert!(rx.has_changed().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_changes() {
        let notifications = Notifications::default();
        let mut rx = notifications.subscribe();

        notifications.show_for("saved", Severity::Success, MS * 100);
        rx.changed().await.ok();
        assert!(rx.borrow_and_update().open);

        rx.changed().await.ok();
        assert!(!rx.borrow_and_update().open);
    }

    #[test]
    fn test_show_without_runtime_stays_open() {
        let notifications = Notifications::default();
        notifications.show("no runtime", Severity::Info);
        assert!(notifications.is_open());
    }
}
