use crate::bot::allowlist::Allowlist;
use crate::error::AppError;

/// Default platform REST endpoint, overridable for tests and proxies.
const DEFAULT_PLATFORM_API_URL: &str = "https://discord.com/api/v10";

const DEFAULT_PORT: u16 = 3000;

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Platform bot token (`BOT_TOKEN`).
    pub bot_token: String,
    /// Platform application id (`APPLICATION_ID`).
    pub application_id: String,
    /// Comma-separated allowlisted community ids (`ALLOWED_GUILD_IDS`).
    pub allowed_guild_ids: String,
    /// Content API GraphQL endpoint (`WIKI_GRAPHQL_URL`).
    pub wiki_graphql_url: String,
    /// Base URL used to construct page links (`WIKI_BASE_URL`).
    pub wiki_base_url: String,
    /// HTTP listen port (`PORT`, default 3000).
    pub port: u16,
    /// Platform REST base URL (`PLATFORM_API_URL`).
    pub platform_api_url: String,
    /// Optional shared secret expected on webhook POSTs (`WEBHOOK_SECRET`).
    pub webhook_secret: Option<String>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            bot_token: require("BOT_TOKEN")?,
            application_id: require("APPLICATION_ID")?,
            allowed_guild_ids: std::env::var("ALLOWED_GUILD_IDS").unwrap_or_default(),
            wiki_graphql_url: require("WIKI_GRAPHQL_URL")?,
            wiki_base_url: require("WIKI_BASE_URL")?,
            port: port_from_env()?,
            platform_api_url: std::env::var("PLATFORM_API_URL")
                .unwrap_or_else(|_| DEFAULT_PLATFORM_API_URL.to_string()),
            webhook_secret: std::env::var("WEBHOOK_SECRET").ok(),
        })
    }

    pub fn allowlist(&self) -> Allowlist {
        Allowlist::from_csv(&self.allowed_guild_ids)
    }
}

fn require(name: &str) -> Result<String, AppError> {
    std::env::var(name).map_err(|_| AppError::Config(format!("{name} not set")))
}

fn port_from_env() -> Result<u16, AppError> {
    match std::env::var("PORT") {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid PORT value '{raw}'"))),
        Err(_) => Ok(DEFAULT_PORT),
    }
}
