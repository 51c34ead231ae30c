use serde::{Deserialize, Serialize};

/// Whether mentions are authored and displayed as `@username` or
/// `@[Display Name]`.
///
/// The mode is fixed for an editing session and is never mixed within a
/// single text. It also decides what the suggestion matcher compares a
/// partial mention against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MentionMode {
    #[default]
    Username,
    DisplayName,
}

impl MentionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentionMode::Username => "username",
            MentionMode::DisplayName => "display-name",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "username" => Some(MentionMode::Username),
            "display-name" => Some(MentionMode::DisplayName),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_and_parse_agree() {
        for mode in [MentionMode::Username, MentionMode::DisplayName] {
            assert_eq!(MentionMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(MentionMode::parse("displayname"), None);
    }

    #[test]
    fn serializes_as_kebab_case() {
        assert_eq!(
            serde_json::to_string(&MentionMode::DisplayName).unwrap(),
            r#""display-name""#
        );
        assert_eq!(
            serde_json::from_str::<MentionMode>(r#""username""#).unwrap(),
            MentionMode::Username
        );
    }
}
