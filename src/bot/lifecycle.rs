//! Admission control at the platform boundary.
//!
//! The allowlist is enforced twice: per interaction in the dispatcher, and
//! here against the bot's actual community memberships, so being added to an
//! unapproved community is corrected rather than merely ignored.

use crate::bot::allowlist::Allowlist;
use crate::bot::dispatcher::{decide_membership, MembershipAction};
use crate::platform::client::PlatformClient;

/// Apply the membership decision for one community.
///
/// All platform failures are logged and swallowed: a failed registration or
/// leave never propagates.
pub async fn apply_membership(
    platform: &dyn PlatformClient,
    allowlist: &Allowlist,
    community_id: &str,
) {
    match decide_membership(community_id, allowlist) {
        MembershipAction::DeployCommands => {
            if let Err(e) = platform.register_commands(community_id).await {
                tracing::warn!("Failed to register commands in {community_id}: {e}");
            } else {
                tracing::info!("Registered commands in community {community_id}");
            }
        }
        MembershipAction::Leave => {
            tracing::info!("Community {community_id} is not allowlisted, leaving");
            if let Err(e) = platform.leave_community(community_id).await {
                tracing::warn!("Failed to leave {community_id}: {e}");
            }
        }
    }
}

/// Startup sync, the counterpart of the platform's "ready" callback.
///
/// Redeploys the command schema in every allowlisted community and leaves any
/// current community that is not allowlisted. Failures are per community and
/// never block the others.
pub async fn sync_memberships(platform: &dyn PlatformClient, allowlist: &Allowlist) {
    for community_id in allowlist.iter() {
        if let Err(e) = platform.register_commands(community_id).await {
            tracing::warn!("Failed to register commands in {community_id}: {e}");
        } else {
            tracing::info!("Registered commands in community {community_id}");
        }
    }

    let current = match platform.list_communities().await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!("Failed to list current communities, skipping leave sweep: {e}");
            return;
        }
    };

    for community_id in current {
        if decide_membership(&community_id, allowlist) == MembershipAction::Leave {
            tracing::info!("Community {community_id} is not allowlisted, leaving");
            if let Err(e) = platform.leave_community(&community_id).await {
                tracing::warn!("Failed to leave {community_id}: {e}");
            }
        }
    }
}
