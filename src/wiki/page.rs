use serde::{Deserialize, Serialize};

/// A public wiki page as held in the in-memory index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiPage {
    /// Human-readable title, as displayed on the wiki.
    pub title: String,
    /// URL path segment — the unique lookup key across the index.
    pub path: String,
    /// Case-folded title used for matching.
    pub lowercase_title: String,
    /// Case-folded tags.
    pub tags: Vec<String>,
}

/// Immutable collection of public wiki pages.
///
/// Built once at process start from the content API; a process restart is the
/// only refresh mechanism. An empty index is a valid state and simply means
/// every search yields no results.
#[derive(Debug, Clone, Default)]
pub struct WikiIndex {
    pages: Vec<WikiPage>,
}

impl WikiIndex {
    pub fn new(pages: Vec<WikiPage>) -> Self {
        Self { pages }
    }

    /// All pages, in the order the content API returned them.
    pub fn pages(&self) -> &[WikiPage] {
        &self.pages
    }

    /// Look up a page by its unique path.
    pub fn find_by_path(&self, path: &str) -> Option<&WikiPage> {
        self.pages.iter().find(|p| p.path == path)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
