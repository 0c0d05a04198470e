use std::sync::Arc;

use crate::bot::allowlist::Allowlist;
use crate::platform::client::PlatformClient;
use crate::wiki::page::WikiIndex;

/// Process-scoped immutable state, built during startup and injected into the
/// HTTP handlers. Nothing in here mutates after load, so handlers share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<WikiIndex>,
    pub allowlist: Arc<Allowlist>,
    pub wiki_base_url: String,
    pub platform: Arc<dyn PlatformClient>,
    pub webhook_secret: Option<String>,
}
