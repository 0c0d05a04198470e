use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::events::events_handler;
use crate::api::interactions::interactions_handler;
use crate::api::status::status_handler;
use crate::state::AppState;

/// Build the application router. Shared between `main` and the integration
/// tests so both exercise the same routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/interactions", post(interactions_handler))
        .route("/events", post(events_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
