//! Cart drawer visibility.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Visibility flags for shared UI chrome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiVisibility {
    pub cart_open: bool,
}

/// UI visibility state container. Memory only.
#[derive(Debug)]
pub struct UiState {
    state: watch::Sender<UiVisibility>,
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(UiVisibility::default());
        Self { state }
    }

    pub fn open_cart(&self) {
        self.set_cart_open(true);
    }

    pub fn close_cart(&self) {
        self.set_cart_open(false);
    }

    pub fn toggle_cart(&self) {
        self.state.send_modify(|ui| ui.cart_open = !ui.cart_open);
    }

    #[must_use]
    pub fn is_cart_open(&self) -> bool {
        self.state.borrow().cart_open
    }

    #[must_use]
    pub fn current(&self) -> UiVisibility {
        *self.state.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<UiVisibility> {
        self.state.subscribe()
    }

    fn set_cart_open(&self, open: bool) {
        self.state.send_if_modified(|ui| {
            let changed = ui.cart_open != open;
            ui.cart_open = open;
            changed
        });
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
