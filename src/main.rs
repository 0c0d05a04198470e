use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;

use wikibot::api::router::build_router;
use wikibot::bot::lifecycle;
use wikibot::config::BotConfig;
use wikibot::platform::client::{PlatformClient, RestPlatformClient};
use wikibot::state::AppState;
use wikibot::wiki::loader::{self, GraphqlContentApi};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wikibot=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting wikibot...");

    let config = BotConfig::from_env()?;

    // One-shot index load. A fetch failure degrades to an empty index rather
    // than aborting startup.
    let content_api = GraphqlContentApi::new(&config.wiki_graphql_url)?;
    let index = loader::load_index(&content_api).await;
    tracing::info!("Wiki index loaded with {} pages", index.len());

    let allowlist = config.allowlist();
    if allowlist.is_empty() {
        tracing::warn!("Allowlist is empty; every community will be denied");
    }

    let platform: Arc<dyn PlatformClient> = Arc::new(RestPlatformClient::new(
        &config.platform_api_url,
        &config.application_id,
        &config.bot_token,
    )?);

    // Startup counterpart of the platform's "ready" callback: deploy commands
    // in allowlisted communities, leave the rest.
    lifecycle::sync_memberships(platform.as_ref(), &allowlist).await;

    let state = AppState {
        index: Arc::new(index),
        allowlist: Arc::new(allowlist),
        wiki_base_url: config.wiki_base_url.clone(),
        platform,
        webhook_secret: config.webhook_secret.clone(),
    };

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
