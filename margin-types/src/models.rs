use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Custom serde module for the optional `joined` timestamp, to ensure RFC3339
// string format on the wire.
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        s.map(|s| s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// A user that can be offered as a mention suggestion.
///
/// Candidate lists arrive fully formed (group members, users who already
/// annotated, users who were mentioned before) and are immutable per
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateUser {
    pub userid: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Server-supplied record for a mention that was created in a previously
/// saved annotation.
///
/// `original_userid` is the identity key: it matches the userid captured
/// inside the mention tag when the mention was created. All other fields
/// reflect the user's state as of the last fetch and may have changed since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionRecord {
    pub userid: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Profile link to render the mention as an anchor, if the user has one.
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "datetime_format")]
    pub joined: Option<DateTime<Utc>>,
    pub original_userid: String,
}

/// Half-open character-index span of the word or mention that overlaps a
/// caret position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOffsets {
    pub start: usize,
    pub end: usize,
}
