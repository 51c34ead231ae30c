//! Rewriting plain-text mentions into the persisted tag form.

use margin_types::{build_account_id, CandidateUser, MentionMode};
use regex::Regex;

use crate::session::DisplayNameMap;
use crate::syntax::{
    display_name_mention, followed_by_boundary, DISPLAY_NAME_MENTIONS, USERNAME_MENTIONS,
};
use crate::tag::mention_tag;

/// Wrap all occurrences of `@username` in the provided text into the
/// corresponding mention tag, as long as they are surrounded by boundary
/// characters.
///
/// For example, `@someuser` with the `hypothes.is` authority becomes
/// `<a data-hyp-mention="" data-userid="acct:someuser@hypothes.is">@someuser</a>`.
///
/// Text with no mentions is returned unchanged.
pub fn wrap_mentions(text: &str, authority: &str) -> String {
    replace_mentions(text, &USERNAME_MENTIONS, shrink_username, |username| {
        Some(mention_tag(
            &build_account_id(username, authority),
            &format!("@{username}"),
        ))
    })
}

/// Wrap all occurrences of `@[Display Name]` in the provided text into the
/// corresponding mention tag, as long as they are surrounded by boundary
/// characters.
///
/// Every matched mention needs an entry in the session's display-name map to
/// produce a tag; non-matching ones are kept as plain text and will not
/// become a real mention server-side.
pub fn wrap_display_name_mentions(text: &str, users: &DisplayNameMap) -> String {
    // No shrinking here: a display-name match always ends at its closing
    // `]`, so there is no shorter mention to fall back to.
    replace_mentions(text, &DISPLAY_NAME_MENTIONS, |_| None, |display_name| {
        let Some(user) = users.get(display_name) else {
            tracing::debug!("no accepted user for display-name mention: {}", display_name);
            return None;
        };
        Some(mention_tag(&user.userid, &format!("@{display_name}")))
    })
}

/// Convert a user into the plain-text mention to insert for the given mode.
///
/// Display-name mode goes through the session map instead (see
/// [`DisplayNameMap::accept`]) so the accepted user is remembered for
/// encoding.
pub fn to_plain_text_mention(user: &CandidateUser, mode: MentionMode) -> String {
    match mode {
        MentionMode::Username => format!("@{}", user.username),
        MentionMode::DisplayName => {
            display_name_mention(user.display_name.as_deref().unwrap_or_default())
        }
    }
}

/// Replace every boundary-delimited mention candidate for which
/// `replacement` produces a tag.
///
/// The leading boundary character (capture 1) is re-emitted outside the tag,
/// and the trailing boundary is only checked, never consumed. When the check
/// fails, `shrink` may pick a shorter name that ends right before a boundary
/// character, the way a lookahead pattern backtracks a greedy match. A
/// `None` replacement leaves the candidate as plain text.
fn replace_mentions(
    text: &str,
    pattern: &Regex,
    shrink: impl Fn(&str) -> Option<usize>,
    mut replacement: impl FnMut(&str) -> Option<String>,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in pattern.captures_iter(text) {
        let whole = caps.get(0).expect("capture 0 is the whole match");
        let name = caps.get(2).expect("capture 2 is the name");
        let (name, end) = if followed_by_boundary(text, whole.end()) {
            (name.as_str(), whole.end())
        } else {
            match shrink(name.as_str()) {
                Some(len) => (&name.as_str()[..len], name.start() + len),
                None => continue,
            }
        };
        let Some(tag) = replacement(name) else {
            continue;
        };

        out.push_str(&text[last..whole.start()]);
        out.push_str(&caps[1]);
        out.push_str(&tag);
        last = end;
    }

    out.push_str(&text[last..]);
    out
}

/// Backtrack a greedy username match whose trailing character is not a
/// boundary.
///
/// `.` is the one character that is both a username character and a
/// boundary, so the only shorter valid mentions end right before a dot.
/// Returns the longest such prefix that is still a valid username (three or
/// more characters, no trailing dot), or `None` when there is none.
fn shrink_username(username: &str) -> Option<usize> {
    // Username characters are all ASCII, so byte indexing is safe.
    let bytes = username.as_bytes();
    (3..bytes.len())
        .rev()
        .find(|&len| bytes[len] == b'.' && bytes[len - 1] != b'.')
}
