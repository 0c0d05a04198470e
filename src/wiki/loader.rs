use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::error::AppError;
use crate::wiki::page::{WikiIndex, WikiPage};

/// A page listing entry as returned by the content API, before normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
    pub id: i64,
    pub title: String,
    pub path: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
}

/// Trait for the wiki content API, enabling mock testing.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Fetch the entire page catalog in one request.
    async fn list_pages(&self) -> Result<Vec<RawPage>, AppError>;
}

/// Single GraphQL query fetching the whole catalog — no pagination, the
/// content API returns every page at once.
const PAGE_LIST_QUERY: &str =
    "{ pages { list(orderBy: TITLE) { id title path tags isPrivate } } }";

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<GraphqlData>,
}

#[derive(Debug, Deserialize)]
struct GraphqlData {
    pages: GraphqlPages,
}

#[derive(Debug, Deserialize)]
struct GraphqlPages {
    list: Vec<RawPage>,
}

/// GraphQL implementation of the ContentApi.
pub struct GraphqlContentApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl GraphqlContentApi {
    pub fn new(endpoint: &str) -> Result<Self, AppError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| AppError::Config(format!("Invalid content API URL '{endpoint}': {e}")))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }
}

#[async_trait]
impl ContentApi for GraphqlContentApi {
    async fn list_pages(&self) -> Result<Vec<RawPage>, AppError> {
        let body = serde_json::json!({ "query": PAGE_LIST_QUERY });

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ContentApi(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ContentApi(format!(
                "Unexpected status: {}",
                response.status()
            )));
        }

        let parsed: GraphqlResponse = response
            .json()
            .await
            .map_err(|e| AppError::ContentApi(format!("Invalid response body: {e}")))?;

        let data = parsed
            .data
            .ok_or_else(|| AppError::ContentApi("Response carried no data".into()))?;

        Ok(data.pages.list)
    }
}

/// Normalize a raw page listing into the immutable index.
///
/// Private pages are dropped; titles and tags are case-folded for matching.
pub fn build_index(raw: Vec<RawPage>) -> WikiIndex {
    let pages = raw
        .into_iter()
        .filter(|p| !p.is_private)
        .map(|p| WikiPage {
            lowercase_title: p.title.to_lowercase(),
            title: p.title,
            path: p.path,
            tags: p.tags.iter().map(|t| t.to_lowercase()).collect(),
        })
        .collect();

    WikiIndex::new(pages)
}

/// One-shot index load at startup.
///
/// Never fails: any fetch or decode error is logged and yields an empty index,
/// which callers must treat as "no results" rather than an error state.
pub async fn load_index(api: &dyn ContentApi) -> WikiIndex {
    match api.list_pages().await {
        Ok(raw) => build_index(raw),
        Err(e) => {
            tracing::warn!("Failed to load wiki pages, starting with an empty index: {e}");
            WikiIndex::default()
        }
    }
}
