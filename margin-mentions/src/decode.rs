//! Rewriting persisted mention tags back into plain text for editing.

use margin_types::{MentionMode, MentionRecord};

use crate::syntax::display_name_mention;
use crate::tag::find_mention_tags;

/// Replace every mention tag in `text` with its plain-text representation:
/// `@username` in username mode, `@[Display Name]` in display-name mode.
///
/// Each tag's captured userid is matched against the records'
/// `original_userid`, so the plain text uses the most recent username or
/// display name in case they changed since the mention was created. A tag
/// with no matching record (or no userid at all) falls back to its literal
/// content; decoding never drops visible text and never fails.
///
/// Content outside recognized tags is copied verbatim, even if it contains
/// tag-like substrings.
pub fn unwrap_mentions(text: &str, mode: MentionMode, records: &[MentionRecord]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for (range, tag) in find_mention_tags(text) {
        // The persisted form always has `@` + at least one character as
        // content; anything else is not one of our tags.
        let Some(content) = tag.content.strip_prefix('@') else {
            continue;
        };
        if content.is_empty() {
            continue;
        }

        let record = tag
            .userid
            .as_deref()
            .and_then(|userid| records.iter().find(|r| r.original_userid == userid));
        if record.is_none() {
            tracing::debug!("mention tag matched no record: {}", tag.content);
        }

        let replacement = match mode {
            MentionMode::Username => {
                format!("@{}", record.map_or(content, |r| r.username.as_str()))
            }
            MentionMode::DisplayName => {
                // An empty current display name means "no information", not
                // "intentionally blank": keep the name captured in the tag.
                let name = record
                    .and_then(|r| r.display_name.as_deref())
                    .filter(|name| !name.is_empty())
                    .unwrap_or(content);
                display_name_mention(name)
            }
        };

        out.push_str(&text[last..range.start]);
        out.push_str(&replacement);
        last = range.end;
    }

    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::mention_tag;

    fn tag(username: &str) -> String {
        mention_tag(
            &format!("acct:{username}@hypothes.is"),
            &format!("@{username}"),
        )
    }

    fn display_name_tag(display_name: &str, username: &str) -> String {
        mention_tag(
            &format!("acct:{username}@hypothes.is"),
            &format!("@{display_name}"),
        )
    }

    fn record(original_userid: &str, username: &str, display_name: Option<&str>) -> MentionRecord {
        MentionRecord {
            userid: original_userid.to_string(),
            username: username.to_string(),
            display_name: display_name.map(str::to_string),
            link: None,
            description: None,
            joined: None,
            original_userid: original_userid.to_string(),
        }
    }

    #[test]
    fn unmatched_tag_keeps_its_content() {
        assert_eq!(
            unwrap_mentions(
                &format!("Hello {}", tag("jane_doe")),
                MentionMode::Username,
                &[]
            ),
            "Hello @jane_doe"
        );
        assert_eq!(
            unwrap_mentions(
                &format!("Hello {}", display_name_tag("Jane Doe", "jane_doe")),
                MentionMode::DisplayName,
                &[]
            ),
            "Hello @[Jane Doe]"
        );
    }

    #[test]
    fn matched_tag_uses_the_current_username() {
        let records = [record("acct:jane_doe@hypothes.is", "jane_edited", None)];
        assert_eq!(
            unwrap_mentions(
                &format!("Hello {}", tag("jane_doe")),
                MentionMode::Username,
                &records
            ),
            "Hello @jane_edited"
        );
    }

    #[test]
    fn matched_tag_uses_the_current_display_name() {
        let records = [record(
            "acct:jane_doe@hypothes.is",
            "jane_doe",
            Some("My new name"),
        )];
        assert_eq!(
            unwrap_mentions(
                &format!("Hello {}", display_name_tag("Jane Doe", "jane_doe")),
                MentionMode::DisplayName,
                &records
            ),
            "Hello @[My new name]"
        );
    }

    #[test]
    fn empty_current_display_name_falls_back_to_tag_content() {
        let records = [record("acct:jane_doe@hypothes.is", "jane_doe", Some(""))];
        assert_eq!(
            unwrap_mentions(
                &format!("Hello {}", display_name_tag("Jane Doe", "jane_doe")),
                MentionMode::DisplayName,
                &records
            ),
            "Hello @[Jane Doe]"
        );
    }

    #[test]
    fn tag_without_userid_falls_back_to_content() {
        assert_eq!(
            unwrap_mentions(
                r#"Hello <a data-hyp-mention="">@user_id_missing</a>"#,
                MentionMode::Username,
                &[]
            ),
            "Hello @user_id_missing"
        );
        assert_eq!(
            unwrap_mentions(
                r#"Hello <a data-hyp-mention="">@User ID Missing</a>"#,
                MentionMode::DisplayName,
                &[]
            ),
            "Hello @[User ID Missing]"
        );
    }

    #[test]
    fn surrounding_text_is_copied_verbatim() {
        let text = format!("a < b & <a href=\"x\">link</a> {} end", tag("bob"));
        assert_eq!(
            unwrap_mentions(&text, MentionMode::Username, &[]),
            "a < b & <a href=\"x\">link</a> @bob end"
        );
    }

    #[test]
    fn malformed_tags_are_left_alone() {
        // No content, or content not starting with `@`.
        let text = r#"<a data-hyp-mention="" data-userid="acct:x@y"></a> and <a data-hyp-mention="">plain</a>"#;
        assert_eq!(unwrap_mentions(text, MentionMode::Username, &[]), text);
    }

    #[test]
    fn multiple_tags_across_lines() {
        let text = format!(
            "{} hello\n{} how are you",
            tag("username"),
            tag("another")
        );
        assert_eq!(
            unwrap_mentions(&text, MentionMode::Username, &[]),
            "@username hello\n@another how are you"
        );
    }
}
