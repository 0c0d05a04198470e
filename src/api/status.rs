/// Axum handler for `GET /status` — trivial liveness response.
pub async fn status_handler() -> &'static str {
    "Bot is running!"
}
