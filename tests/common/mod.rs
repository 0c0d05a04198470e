use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;

use wikibot::api::router::build_router;
use wikibot::bot::allowlist::Allowlist;
use wikibot::error::AppError;
use wikibot::platform::client::PlatformClient;
use wikibot::state::AppState;
use wikibot::wiki::loader::{build_index, RawPage};

/// In-memory platform double recording every outbound call.
#[derive(Default)]
pub struct FakePlatform {
    /// Communities the bot currently sits in.
    pub current: Mutex<Vec<String>>,
    /// Communities whose registration/leave calls must fail.
    pub failing: Mutex<Vec<String>>,
    pub registered: Mutex<Vec<String>>,
    pub left: Mutex<Vec<String>>,
}

impl FakePlatform {
    fn fails_for(&self, community_id: &str) -> bool {
        self.failing
            .lock()
            .unwrap()
            .iter()
            .any(|id| id == community_id)
    }
}

#[async_trait]
impl PlatformClient for FakePlatform {
    async fn list_communities(&self) -> Result<Vec<String>, AppError> {
        Ok(self.current.lock().unwrap().clone())
    }

    async fn register_commands(&self, community_id: &str) -> Result<(), AppError> {
        if self.fails_for(community_id) {
            return Err(AppError::Platform(format!(
                "registration rejected for {community_id}"
            )));
        }
        self.registered
            .lock()
            .unwrap()
            .push(community_id.to_string());
        Ok(())
    }

    async fn leave_community(&self, community_id: &str) -> Result<(), AppError> {
        if self.fails_for(community_id) {
            return Err(AppError::Platform(format!(
                "leave rejected for {community_id}"
            )));
        }
        self.left.lock().unwrap().push(community_id.to_string());
        Ok(())
    }
}

/// Builds the application state and router against in-memory collaborators.
pub struct TestEnv {
    pub platform: Arc<FakePlatform>,
    pub state: AppState,
}

impl TestEnv {
    pub fn new(pages: Vec<RawPage>, allowlist_csv: &str) -> Self {
        Self::build(pages, allowlist_csv, None)
    }

    pub fn with_secret(pages: Vec<RawPage>, allowlist_csv: &str, secret: &str) -> Self {
        Self::build(pages, allowlist_csv, Some(secret.to_string()))
    }

    fn build(pages: Vec<RawPage>, allowlist_csv: &str, secret: Option<String>) -> Self {
        let platform = Arc::new(FakePlatform::default());

        let state = AppState {
            index: Arc::new(build_index(pages)),
            allowlist: Arc::new(Allowlist::from_csv(allowlist_csv)),
            wiki_base_url: "https://wiki.example.com".to_string(),
            platform: platform.clone(),
            webhook_secret: secret,
        };

        Self { platform, state }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(build_router(self.state.clone()))
    }
}

pub fn page(title: &str, path: &str, tags: &[&str]) -> RawPage {
    RawPage {
        id: 0,
        title: title.to_string(),
        path: path.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_private: false,
    }
}
