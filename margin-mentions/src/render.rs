//! Classifying and decorating mention tags in a rendered document.

use margin_types::{MentionMode, MentionRecord};

use crate::tag::{escape_text, find_mention_tags, MentionTag, MentionType};

/// What a decorated mention occurrence resolved to: the record it matched,
/// or the literal content the backend discarded as invalid.
///
/// Possible reasons a mention is invalid: the user does not exist, belongs
/// to a different group, and so on.
#[derive(Debug, Clone, PartialEq)]
pub enum MentionRef {
    Resolved(MentionRecord),
    Invalid(String),
}

/// One decorated mention occurrence, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedMention {
    pub mention_type: MentionType,
    pub reference: MentionRef,
}

/// Result of decorating a document's mention tags.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedMentions {
    /// The document with every unprocessed mention tag rewritten into its
    /// decorated form.
    pub markup: String,
    /// One entry per mention tag found, for callers that need to
    /// cross-reference occurrences with their records (tooltips, counts).
    pub mentions: Vec<ProcessedMention>,
}

/// Find mention tags in `markup`, match them against `records` and rewrite
/// each into its decorated form:
///
/// - a matching record with a link renders as an anchor (`link`) pointing at
///   it;
/// - a matching record without a link renders as a span (`no-link`);
/// - no matching record renders as an `invalid` span that keeps the tag's
///   original content and carries no userid.
///
/// Valid mentions display the record's most recent username or display name
/// (an empty display name falls back to the tag's content) and carry the
/// record's current userid. A tag that already has a
/// `data-hyp-mention-type` attribute was decorated before and is returned
/// unchanged, so processing is idempotent.
pub fn process_mention_tags(
    markup: &str,
    records: &[MentionRecord],
    mode: MentionMode,
) -> ProcessedMentions {
    let mut out = String::with_capacity(markup.len());
    let mut mentions = Vec::new();
    let mut last = 0;

    for (range, tag) in find_mention_tags(markup) {
        // An undecorated tag holds the userid captured when the mention was
        // created; decoration rewrites the attribute to the record's current
        // userid, so reprocessing joins on that instead.
        let record = tag.userid.as_deref().and_then(|userid| {
            if tag.mention_type.is_some() {
                records.iter().find(|r| r.userid == userid)
            } else {
                records.iter().find(|r| r.original_userid == userid)
            }
        });
        let reference = record.map_or_else(
            || MentionRef::Invalid(tag.content.clone()),
            |r| MentionRef::Resolved(r.clone()),
        );

        // Already decorated: report it, leave the markup untouched.
        if let Some(mention_type) = tag.mention_type {
            mentions.push(ProcessedMention {
                mention_type,
                reference,
            });
            continue;
        }

        let mention_type = match record {
            Some(r) if r.link.is_some() => MentionType::Link,
            Some(_) => MentionType::NoLink,
            None => MentionType::Invalid,
        };
        let decorated = MentionTag {
            userid: record.map(|r| r.userid.clone()),
            mention_type: Some(mention_type),
            link: record.and_then(|r| r.link.clone()),
            content: decorated_content(&tag, record, mode),
        };

        out.push_str(&markup[last..range.start]);
        out.push_str(&decorated.to_markup());
        last = range.end;

        mentions.push(ProcessedMention {
            mention_type,
            reference,
        });
    }

    out.push_str(&markup[last..]);
    ProcessedMentions {
        markup: out,
        mentions,
    }
}

/// The text a decorated mention displays: the record's most recent username
/// or display name, except that invalid mentions and empty display names
/// keep the content captured in the tag.
fn decorated_content(tag: &MentionTag, record: Option<&MentionRecord>, mode: MentionMode) -> String {
    let Some(record) = record else {
        return tag.content.clone();
    };
    match mode {
        MentionMode::Username => escape_text(&format!("@{}", record.username)),
        MentionMode::DisplayName => match record.display_name.as_deref() {
            Some(name) if !name.is_empty() => escape_text(&format!("@{name}")),
            _ => tag.content.clone(),
        },
    }
}
