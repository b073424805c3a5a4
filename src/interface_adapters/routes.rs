use crate::interface_adapters::handlers::{read_state, reset, update};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

// Build the HTTP router for the polled game endpoints.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/update", get(update))
        .route("/state", get(read_state))
        .route("/reset", post(reset))
        .with_state(state)
}
