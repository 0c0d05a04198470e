use std::collections::HashSet;

/// The fixed set of community ids permitted to use the bot.
///
/// Loaded once from configuration at startup and never mutated. An empty
/// allowlist admits nobody — fail-closed.
#[derive(Debug, Clone, Default)]
pub struct Allowlist {
    ids: HashSet<String>,
}

impl Allowlist {
    /// Parse a comma-separated id list. Whitespace around entries is ignored,
    /// empty entries are skipped.
    pub fn from_csv(raw: &str) -> Self {
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Self { ids }
    }

    pub fn is_allowed(&self, community_id: &str) -> bool {
        self.ids.contains(community_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_allowlist_rejects_everything() {
        let allowlist = Allowlist::default();
        assert!(!allowlist.is_allowed("123"));
        assert!(!allowlist.is_allowed(""));
    }

    #[test]
    fn parses_comma_separated_ids() {
        let allowlist = Allowlist::from_csv("111, 222,333");
        assert!(allowlist.is_allowed("111"));
        assert!(allowlist.is_allowed("222"));
        assert!(allowlist.is_allowed("333"));
        assert!(!allowlist.is_allowed("444"));
    }

    #[test]
    fn skips_empty_entries() {
        let allowlist = Allowlist::from_csv(",111,, ,");
        assert!(allowlist.is_allowed("111"));
        assert!(!allowlist.is_allowed(""));
    }
}
