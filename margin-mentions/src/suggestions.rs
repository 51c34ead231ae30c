//! Matching candidate users against a partially typed mention.

use std::collections::HashSet;

use margin_types::{CandidateUser, MentionMode};
use serde::{Deserialize, Serialize};

/// Cap on the number of suggestions returned for one partial mention.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 10;

/// The candidate-user list, which may still be loading.
///
/// Candidates are fetched elsewhere; this core only ever sees complete
/// snapshots of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CandidateUsers {
    Loading,
    Loaded { users: Vec<CandidateUser> },
}

/// Load state for the focused group's member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum GroupMembers {
    NotLoaded,
    Loading,
    Loaded { members: Vec<CandidateUser> },
}

/// Filter the candidate list against a partially typed mention.
///
/// A `None` mention means there is no active mention context, so nothing is
/// suggested. An empty mention (the author just typed `@`) matches every
/// candidate. Otherwise candidates are matched case-insensitively: in
/// username mode against `"{username} {display name}"`, in display-name mode
/// against the display name alone.
///
/// Input order is preserved and at most `max_results` users are returned.
pub fn users_matching_mention(
    mention: Option<&str>,
    users: &CandidateUsers,
    mode: MentionMode,
    max_results: usize,
) -> Vec<CandidateUser> {
    let CandidateUsers::Loaded { users } = users else {
        return Vec::new();
    };
    let Some(mention) = mention else {
        return Vec::new();
    };

    let mention = mention.to_lowercase();
    users
        .iter()
        .filter(|user| {
            if mention.is_empty() {
                return true;
            }
            match mode {
                MentionMode::Username => format!(
                    "{} {}",
                    user.username,
                    user.display_name.as_deref().unwrap_or_default()
                )
                .to_lowercase()
                .contains(&mention),
                MentionMode::DisplayName => user
                    .display_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&mention)),
            }
        })
        .take(max_results)
        .cloned()
        .collect()
}

/// Merge the users who already annotated the document, the users who were
/// mentioned before and the focused group's members into one candidate
/// snapshot.
///
/// The result is `Loading` until the group members have loaded. Users are
/// deduplicated by userid and sorted by username in username mode, or by
/// display name (then username) in display-name mode.
pub fn combine_users_for_mentions(
    users_who_annotated: &[CandidateUser],
    users_who_were_mentioned: &[CandidateUser],
    focused_group_members: &GroupMembers,
    mode: MentionMode,
) -> CandidateUsers {
    let GroupMembers::Loaded { members } = focused_group_members else {
        return CandidateUsers::Loading;
    };

    let mut seen = HashSet::new();
    let mut users: Vec<CandidateUser> = users_who_annotated
        .iter()
        .chain(users_who_were_mentioned)
        .chain(members)
        .filter(|user| seen.insert(user.userid.clone()))
        .cloned()
        .collect();
    users.sort_by_key(|user| sort_key(user, mode));

    CandidateUsers::Loaded { users }
}

fn sort_key(user: &CandidateUser, mode: MentionMode) -> (String, String) {
    match mode {
        MentionMode::Username => (user.username.to_lowercase(), String::new()),
        MentionMode::DisplayName => (
            user.display_name.as_deref().unwrap_or_default().to_lowercase(),
            user.username.to_lowercase(),
        ),
    }
}
