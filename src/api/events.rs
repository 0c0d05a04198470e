use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use crate::api::interactions::verify_webhook_secret;
use crate::bot::lifecycle;
use crate::error::AppError;
use crate::platform::types::{LifecycleEvent, EVENT_COMMUNITY_JOIN};
use crate::state::AppState;

/// Axum handler for `POST /events` — lifecycle webhook deliveries.
///
/// Only community-join events matter here; anything else is acknowledged and
/// ignored so new platform event kinds never cause delivery retries.
pub async fn events_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<LifecycleEvent>,
) -> Result<StatusCode, AppError> {
    verify_webhook_secret(&state, &headers)?;

    match (event.kind.as_str(), event.guild_id.as_deref()) {
        (EVENT_COMMUNITY_JOIN, Some(community_id)) => {
            lifecycle::apply_membership(state.platform.as_ref(), &state.allowlist, community_id)
                .await;
        }
        (EVENT_COMMUNITY_JOIN, None) => {
            return Err(AppError::BadRequest("Join event without a community id".into()));
        }
        _ => tracing::debug!("Ignoring lifecycle event kind {}", event.kind),
    }

    Ok(StatusCode::NO_CONTENT)
}
