use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::bot::allowlist::Allowlist;
use crate::bot::dispatcher;
use crate::error::AppError;
use crate::platform::types::{
    InteractionRequest, InteractionResponse, INTERACTION_AUTOCOMPLETE, INTERACTION_COMMAND,
    INTERACTION_PING,
};
use crate::state::AppState;
use crate::wiki::page::WikiIndex;

/// Header carrying the shared webhook secret, when one is configured.
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// Check the shared-secret header on webhook POSTs.
///
/// No-op when no secret is configured, since the platform's own delivery
/// verification may already cover authenticity.
pub fn verify_webhook_secret(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(expected) = state.webhook_secret.as_deref() else {
        return Ok(());
    };

    let presented = headers
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|v| v.to_str().ok());

    if presented != Some(expected) {
        return Err(AppError::Auth("Invalid webhook secret".into()));
    }

    Ok(())
}

/// Core interaction logic — separated from the HTTP layer for testability.
///
/// The allowlist guard runs before anything else. An unauthorized command gets
/// the fixed denial reply; an unauthorized autocomplete gets an empty choice
/// list, the closest the response channel allows to silently dropping it.
pub fn process_interaction(
    index: &WikiIndex,
    allowlist: &Allowlist,
    wiki_base_url: &str,
    request: &InteractionRequest,
) -> Result<InteractionResponse, AppError> {
    if request.kind == INTERACTION_PING {
        return Ok(InteractionResponse::pong());
    }

    let authorized = request
        .guild_id
        .as_deref()
        .is_some_and(|id| allowlist.is_allowed(id));

    if !authorized {
        tracing::info!(
            "Denied interaction from community {}",
            request.guild_id.as_deref().unwrap_or("<none>")
        );
        return Ok(match request.kind {
            INTERACTION_AUTOCOMPLETE => InteractionResponse::choices(Vec::new()),
            _ => InteractionResponse::message(dispatcher::denial_reply()),
        });
    }

    match request.kind {
        INTERACTION_AUTOCOMPLETE => {
            let typed = request.option_value("query").unwrap_or_default();
            let candidates = dispatcher::handle_autocomplete(index, typed);
            Ok(InteractionResponse::choices(candidates))
        }
        INTERACTION_COMMAND => {
            let value = request.option_value("query").unwrap_or_default();
            let reply = dispatcher::handle_command(index, wiki_base_url, value);
            Ok(InteractionResponse::message(reply))
        }
        other => Err(AppError::BadRequest(format!(
            "Unsupported interaction type {other}"
        ))),
    }
}

/// Axum handler for `POST /interactions`.
pub async fn interactions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<InteractionRequest>,
) -> Result<Json<InteractionResponse>, AppError> {
    verify_webhook_secret(&state, &headers)?;

    let response = process_interaction(
        &state.index,
        &state.allowlist,
        &state.wiki_base_url,
        &request,
    )?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::types::{RESPONSE_AUTOCOMPLETE, RESPONSE_MESSAGE, RESPONSE_PONG};
    use crate::wiki::loader::{build_index, RawPage};

    fn sample_index() -> WikiIndex {
        build_index(vec![RawPage {
            id: 1,
            title: "Setup Guide".to_string(),
            path: "setup".to_string(),
            tags: vec!["install".to_string()],
            is_private: false,
        }])
    }

    fn command(guild_id: Option<&str>, value: &str) -> InteractionRequest {
        serde_json::from_value(serde_json::json!({
            "type": INTERACTION_COMMAND,
            "guild_id": guild_id,
            "data": {
                "name": "wiki",
                "options": [{ "name": "query", "value": value }]
            }
        }))
        .expect("valid request")
    }

    #[test]
    fn ping_is_answered_with_pong_before_the_allowlist_guard() {
        let request: InteractionRequest =
            serde_json::from_value(serde_json::json!({ "type": INTERACTION_PING }))
                .expect("valid request");

        let response = process_interaction(
            &sample_index(),
            &Allowlist::default(),
            "https://wiki.example.com",
            &request,
        )
        .expect("ping succeeds");

        assert_eq!(response.kind, RESPONSE_PONG);
    }

    #[test]
    fn unauthorized_command_gets_the_denial_and_no_lookup() {
        let allowlist = Allowlist::from_csv("999");
        let response = process_interaction(
            &sample_index(),
            &allowlist,
            "https://wiki.example.com",
            &command(Some("111"), "setup"),
        )
        .expect("denial is not an error");

        assert_eq!(response.kind, RESPONSE_MESSAGE);
        let data = response.data.expect("denial carries data");
        assert_eq!(data.content.as_deref(), Some(dispatcher::DENIAL_MESSAGE));
    }

    #[test]
    fn missing_community_id_is_denied() {
        let allowlist = Allowlist::from_csv("111");
        let response = process_interaction(
            &sample_index(),
            &allowlist,
            "https://wiki.example.com",
            &command(None, "setup"),
        )
        .expect("denial is not an error");

        let data = response.data.expect("denial carries data");
        assert_eq!(data.content.as_deref(), Some(dispatcher::DENIAL_MESSAGE));
    }

    #[test]
    fn unauthorized_autocomplete_gets_empty_choices() {
        let request: InteractionRequest = serde_json::from_value(serde_json::json!({
            "type": INTERACTION_AUTOCOMPLETE,
            "guild_id": "111",
            "data": {
                "name": "wiki",
                "options": [{ "name": "query", "value": "setup" }]
            }
        }))
        .expect("valid request");

        let response = process_interaction(
            &sample_index(),
            &Allowlist::default(),
            "https://wiki.example.com",
            &request,
        )
        .expect("denial is not an error");

        assert_eq!(response.kind, RESPONSE_AUTOCOMPLETE);
        let data = response.data.expect("autocomplete carries data");
        assert_eq!(data.choices.expect("choices present").len(), 0);
    }

    #[test]
    fn authorized_command_resolves_the_page() {
        let allowlist = Allowlist::from_csv("111");
        let response = process_interaction(
            &sample_index(),
            &allowlist,
            "https://wiki.example.com",
            &command(Some("111"), "setup"),
        )
        .expect("command succeeds");

        let content = response
            .data
            .and_then(|d| d.content)
            .expect("reply has content");
        assert!(content.contains("Setup Guide"));
        assert!(content.contains("https://wiki.example.com/setup"));
    }

    #[test]
    fn unknown_interaction_kind_is_a_bad_request() {
        let request: InteractionRequest =
            serde_json::from_value(serde_json::json!({ "type": 3, "guild_id": "111" }))
                .expect("valid request");

        let result = process_interaction(
            &sample_index(),
            &Allowlist::from_csv("111"),
            "https://wiki.example.com",
            &request,
        );

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
