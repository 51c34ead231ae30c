//! The shared mention grammar: boundary characters, identifier patterns and
//! the two plain-text mention forms.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern that matches characters treated as the boundary of a mention.
pub const BOUNDARY_CHARS: &str = r#"[\s,.;:|?!'"\-()\[\]{}]"#;

/// Pattern that matches valid usernames: three or more characters of
/// letters, digits, dots and underscores, with no leading or trailing dot.
pub const USERNAME_PAT: &str = "[A-Za-z0-9_][A-Za-z0-9._]+[A-Za-z0-9_]";

/// Pattern that matches display names.
///
/// Display names can have any amount of characters, except the square
/// brackets used to delimit the display name itself.
pub const DISPLAY_NAME_PAT: &str = r"[^\[\]]*";

/// Finds candidate username mentions in text.
///
/// The `regex` crate has no lookahead, so this only checks the leading
/// boundary; callers must verify the match is followed by a boundary
/// character or end of text (see [`followed_by_boundary`]).
pub static USERNAME_MENTIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("(^|{BOUNDARY_CHARS})@({USERNAME_PAT})"))
        .expect("Failed to compile username mention regex")
});

/// Finds candidate display-name mentions (`@[Display Name]`) in text.
///
/// Same trailing-boundary caveat as [`USERNAME_MENTIONS`].
pub static DISPLAY_NAME_MENTIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(^|{BOUNDARY_CHARS})@\[({DISPLAY_NAME_PAT})\]"))
        .expect("Failed to compile display-name mention regex")
});

/// Whether a character delimits a mention or word.
pub fn is_boundary_char(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            ',' | '.' | ';' | ':' | '|' | '?' | '!' | '\'' | '"' | '-' | '(' | ')' | '[' | ']'
                | '{' | '}'
        )
}

/// Whether the text at `byte_pos` starts with a boundary character or is the
/// end of the text. This is the zero-width trailing check that a regex
/// lookahead would perform: the boundary is never part of the match.
pub(crate) fn followed_by_boundary(text: &str, byte_pos: usize) -> bool {
    text[byte_pos..].chars().next().map_or(true, is_boundary_char)
}

/// Convert a display name into its plain-text mention form.
/// `Display Name` -> `@[Display Name]`
///
/// Square brackets are removed from the name, as they are reserved to
/// delimit the beginning and end of the display name itself.
/// `Foo [Bar]` -> `@[Foo Bar]`
pub fn display_name_mention(display_name: &str) -> String {
    let name: String = display_name
        .chars()
        .filter(|c| !matches!(c, '[' | ']'))
        .collect();
    format!("@[{name}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_pattern_requires_three_chars() {
        let re = Regex::new(&format!("^{USERNAME_PAT}$")).unwrap();
        assert!(!re.is_match("ab"));
        assert!(re.is_match("abc"));
        assert!(re.is_match("jane.doe"));
        assert!(re.is_match("jane_doe_99"));
    }

    #[test]
    fn username_pattern_rejects_leading_and_trailing_dots() {
        let re = Regex::new(&format!("^{USERNAME_PAT}$")).unwrap();
        assert!(!re.is_match(".jane"));
        assert!(!re.is_match("jane."));
        assert!(re.is_match("j.ane"));
    }

    #[test]
    fn boundary_chars_match_the_pattern() {
        let re = Regex::new(BOUNDARY_CHARS).unwrap();
        for c in [
            ' ', '\t', '\n', ',', '.', ';', ':', '|', '?', '!', '\'', '"', '-', '(', ')', '[',
            ']', '{', '}',
        ] {
            assert!(is_boundary_char(c), "expected boundary: {c:?}");
            assert!(re.is_match(&c.to_string()), "pattern misses: {c:?}");
        }
        for c in ['a', 'Z', '0', '_', '@', '+', '/'] {
            assert!(!is_boundary_char(c), "unexpected boundary: {c:?}");
        }
    }

    #[test]
    fn trailing_boundary_check() {
        assert!(followed_by_boundary("foo", 3)); // end of text
        assert!(followed_by_boundary("foo bar", 3));
        assert!(followed_by_boundary("foo,bar", 3));
        assert!(!followed_by_boundary("foobar", 3));
    }

    #[test]
    fn display_name_mention_strips_brackets() {
        assert_eq!(display_name_mention("Jane Doe"), "@[Jane Doe]");
        assert_eq!(
            display_name_mention("Jane [Doe] [More Brackets]"),
            "@[Jane Doe More Brackets]"
        );
        assert_eq!(display_name_mention(""), "@[]");
    }
}
