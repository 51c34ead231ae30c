//! The inline tag form used to persist mentions.
//!
//! A freshly encoded mention is serialized as
//! `<a data-hyp-mention="" data-userid="{userid}">{content}</a>`, where the
//! userid is captured at creation time and the content is the plain-text
//! mention that was visible when the tag was created. After render-time
//! decoration the tag additionally carries a
//! `data-hyp-mention-type="link|no-link|invalid"` attribute and, for `link`
//! mentions, an `href`.
//!
//! Tags are scanned with a regex rather than a markup parser so that text
//! outside the recognized spans is never re-encoded or otherwise perturbed.
//! That is safe because encoder-produced tags never contain `<` or `>` in
//! attribute values or content.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// How a rendered mention occurrence was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MentionType {
    /// The mention resolved to a user with a profile link.
    Link,
    /// The mention resolved to a user without a profile link.
    NoLink,
    /// The mention did not resolve to any known user.
    Invalid,
}

impl MentionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentionType::Link => "link",
            MentionType::NoLink => "no-link",
            MentionType::Invalid => "invalid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "link" => Some(MentionType::Link),
            "no-link" => Some(MentionType::NoLink),
            "invalid" => Some(MentionType::Invalid),
            _ => None,
        }
    }
}

/// Pattern that matches the special tag used to wrap mentions.
///
/// Attempting to parse markup with a regex is usually problematic, but the
/// tags we produce are constrained enough to get away with it: no `<` or `>`
/// in attribute values or content, and no nested elements.
static MENTION_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:a|span)(\s[^>]*\bdata-hyp-mention\b[^>]*)>([^<]*)</(?:a|span)>")
        .expect("Failed to compile mention tag regex")
});

static USERID_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bdata-userid="([^"]*)""#).expect("Failed to compile userid attribute regex")
});

static TYPE_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bdata-hyp-mention-type="([^"]*)""#)
        .expect("Failed to compile mention-type attribute regex")
});

static HREF_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bhref="([^"]*)""#).expect("Failed to compile href attribute regex")
});

/// A parsed mention tag occurrence.
///
/// `content` is the tag's text exactly as serialized; entity references are
/// kept as-is so that scanning and re-emitting a tag never changes any
/// characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionTag {
    /// The userid captured when the mention was created, if present.
    pub userid: Option<String>,
    /// Set once by the renderer; its presence marks a tag as processed.
    pub mention_type: Option<MentionType>,
    /// Link target, only present on rendered `link` mentions.
    pub link: Option<String>,
    /// Literal text content, including the leading `@`.
    pub content: String,
}

impl MentionTag {
    fn from_parts(attrs: &str, content: &str) -> Self {
        let attr = |re: &Regex| {
            re.captures(attrs)
                .map(|caps| caps[1].to_string())
        };
        MentionTag {
            userid: attr(&USERID_ATTR_RE),
            mention_type: attr(&TYPE_ATTR_RE).and_then(|v| MentionType::parse(&v)),
            link: attr(&HREF_ATTR_RE),
            content: content.to_string(),
        }
    }

    /// Serialize back into markup.
    ///
    /// Undecorated tags and `link` mentions use an anchor element, decorated
    /// `no-link`/`invalid` mentions a span. Attribute layout matches the
    /// form persisted by the backend byte for byte.
    pub fn to_markup(&self) -> String {
        let element = match self.mention_type {
            None | Some(MentionType::Link) => "a",
            Some(_) => "span",
        };

        let mut markup = format!("<{element} data-hyp-mention=\"\"");
        if let Some(mention_type) = self.mention_type {
            markup.push_str(&format!(
                " data-hyp-mention-type=\"{}\"",
                mention_type.as_str()
            ));
        }
        if let Some(link) = &self.link {
            markup.push_str(&format!(" href=\"{}\" target=\"_blank\"", escape_attr(link)));
        }
        if let Some(userid) = &self.userid {
            markup.push_str(&format!(" data-userid=\"{}\"", escape_attr(userid)));
        }
        markup.push('>');
        markup.push_str(&self.content);
        markup.push_str(&format!("</{element}>"));
        markup
    }
}

/// Build the markup for a freshly encoded mention.
pub fn mention_tag(userid: &str, content: &str) -> String {
    MentionTag {
        userid: Some(userid.to_string()),
        mention_type: None,
        link: None,
        content: escape_text(content),
    }
    .to_markup()
}

/// Find all mention tag occurrences in `text`.
///
/// Returns the byte range of each occurrence together with its parsed form.
/// Tag-like substrings that do not carry the `data-hyp-mention` marker, or
/// that cannot be parsed at all, are simply not reported; callers copy them
/// through verbatim.
pub fn find_mention_tags(text: &str) -> Vec<(Range<usize>, MentionTag)> {
    MENTION_TAG_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs = caps.get(1)?.as_str();
            let content = caps.get(2)?.as_str();
            Some((whole.range(), MentionTag::from_parts(attrs, content)))
        })
        .collect()
}

/// Escape text content the way a markup serializer would.
pub(crate) fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape an attribute value.
pub(crate) fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
