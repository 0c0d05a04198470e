//! Pure decision logic for inbound platform events.
//!
//! One function per event kind, each taking the event payload plus the
//! immutable index/allowlist and returning an outbound action. The HTTP and
//! REST adapters around this module stay free of business rules.

use crate::bot::allowlist::Allowlist;
use crate::wiki::page::WikiIndex;
use crate::wiki::search::{self, Candidate};

/// Fixed reply for interactions from communities outside the allowlist.
pub const DENIAL_MESSAGE: &str = "This bot is not available in this community.";

/// Reply when the submitted value is one of the reserved sentinels.
pub const INVALID_SELECTION_MESSAGE: &str =
    "Please select a valid page from the suggestions.";

/// Title used when the submitted path no longer exists in the index.
pub const UNKNOWN_PAGE_TITLE: &str = "Unknown Page";

/// An outbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    /// Ephemeral replies are visible only to the invoking user.
    pub ephemeral: bool,
}

/// What to do about the bot's presence in a community.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipAction {
    /// Community is allowlisted: (re)register the command schema there.
    DeployCommands,
    /// Community is not allowlisted: leave it.
    Leave,
}

/// Live-typing suggestion request.
pub fn handle_autocomplete(index: &WikiIndex, typed: &str) -> Vec<Candidate> {
    search::search(index, typed)
}

/// Full command invocation with a selected `query` value.
///
/// Sentinel values are never resolved as pages. An unknown path degrades to a
/// placeholder title rather than an error so the reply is never blocked on a
/// missing lookup.
pub fn handle_command(index: &WikiIndex, base_url: &str, value: &str) -> Reply {
    if search::is_sentinel(value) {
        return Reply {
            content: INVALID_SELECTION_MESSAGE.to_string(),
            ephemeral: true,
        };
    }

    let title = index
        .find_by_path(value)
        .map(|p| p.title.as_str())
        .unwrap_or(UNKNOWN_PAGE_TITLE);

    Reply {
        content: format!("**{}**\n{}", title, page_url(base_url, value)),
        ephemeral: false,
    }
}

/// Fixed denial for the unauthorized state.
pub fn denial_reply() -> Reply {
    Reply {
        content: DENIAL_MESSAGE.to_string(),
        ephemeral: true,
    }
}

/// Admission decision for a community, used on join events and during the
/// startup sync.
pub fn decide_membership(community_id: &str, allowlist: &Allowlist) -> MembershipAction {
    if allowlist.is_allowed(community_id) {
        MembershipAction::DeployCommands
    } else {
        MembershipAction::Leave
    }
}

fn page_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}
