//! Cart drawer visibility handlers.

use axum::{Json, extract::State};

use crate::state::{AppState, UiVisibility};

pub async fn show(State(state): State<AppState>) -> Json<UiVisibility> {
    Json(state.ui().current())
}

pub async fn open_cart(State(state): State<AppState>) -> Json<UiVisibility> {
    state.ui().open_cart();
    Json(state.ui().current())
}

pub async fn close_cart(State(state): State<AppState>) -> Json<UiVisibility> {
    state.ui().close_cart();
    Json(state.ui().current())
}

pub async fn toggle_cart(State(state): State<AppState>) -> Json<UiVisibility> {
    state.ui().toggle_cart();
    Json(state.ui().current())
}
