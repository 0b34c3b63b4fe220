//! Notification handlers.

use axum::{Json, extract::State};

use crate::state::{AppState, Notification};

/// The current notification, open or closing.
pub async fn show(State(state): State<AppState>) -> Json<Notification> {
    Json(state.notifications().current())
}

/// Dismiss the current notification.
pub async fn hide(State(state): State<AppState>) -> Json<Notification> {
    state.notifications().hide();
    Json(state.notifications().current())
}
