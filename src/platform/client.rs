use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::error::AppError;
use crate::platform::types::wiki_command;

/// Trait for the chat platform's REST API, enabling mock testing.
///
/// Every caller recovers from errors locally (logged, never fatal): a failed
/// registration or leave must not take the process down or block other
/// communities.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Ids of the communities the bot currently sits in.
    async fn list_communities(&self) -> Result<Vec<String>, AppError>;

    /// Register/redeploy the command schema in the given community.
    async fn register_commands(&self, community_id: &str) -> Result<(), AppError>;

    /// Remove the bot's presence from the given community.
    async fn leave_community(&self, community_id: &str) -> Result<(), AppError>;
}

/// REST implementation of the PlatformClient.
pub struct RestPlatformClient {
    client: reqwest::Client,
    base_url: String,
    application_id: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct CommunitySummary {
    id: String,
}

impl RestPlatformClient {
    pub fn new(base_url: &str, application_id: &str, token: &str) -> Result<Self, AppError> {
        // Validate early so a malformed endpoint fails at startup, not on the
        // first outbound call.
        Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid platform API URL '{base_url}': {e}")))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            application_id: application_id.to_string(),
            token: token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("Authorization", format!("Bot {}", self.token))
    }
}

#[async_trait]
impl PlatformClient for RestPlatformClient {
    async fn list_communities(&self) -> Result<Vec<String>, AppError> {
        let url = self.endpoint("/users/@me/guilds");

        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| AppError::Platform(format!("Failed to list communities: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Platform(format!(
                "Listing communities returned {}",
                response.status()
            )));
        }

        let communities: Vec<CommunitySummary> = response
            .json()
            .await
            .map_err(|e| AppError::Platform(format!("Invalid community listing: {e}")))?;

        Ok(communities.into_iter().map(|c| c.id).collect())
    }

    async fn register_commands(&self, community_id: &str) -> Result<(), AppError> {
        let url = self.endpoint(&format!(
            "/applications/{}/guilds/{}/commands",
            self.application_id, community_id
        ));

        // PUT replaces the whole command set, so redeploys are idempotent.
        let response = self
            .authorized(self.client.put(url))
            .json(&vec![wiki_command()])
            .send()
            .await
            .map_err(|e| AppError::Platform(format!("Failed to register commands: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Platform(format!(
                "Command registration for {} returned {}",
                community_id,
                response.status()
            )));
        }

        Ok(())
    }

    async fn leave_community(&self, community_id: &str) -> Result<(), AppError> {
        let url = self.endpoint(&format!("/users/@me/guilds/{community_id}"));

        let response = self
            .authorized(self.client.delete(url))
            .send()
            .await
            .map_err(|e| AppError::Platform(format!("Failed to leave community: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Platform(format!(
                "Leaving {} returned {}",
                community_id,
                response.status()
            )));
        }

        Ok(())
    }
}
