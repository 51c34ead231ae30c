//! Session-scoped memory of which user each typed display-name mention
//! refers to.
//!
//! A display-name mention is free text: `@[Jane Doe]` carries no userid, so
//! the editing session has to remember which candidate the author actually
//! picked from the suggestion list. The map is keyed by the display name
//! exactly as it was placed into the text and is passed explicitly to
//! [`crate::encode::wrap_display_name_mentions`] when the annotation is
//! saved.
//!
//! Entries keep the snapshot taken at accept time. If the user's display
//! name changes between typing and saving, the mention is still encoded from
//! the snapshot; it is not re-resolved.

use std::collections::HashMap;

use margin_types::CandidateUser;

use crate::syntax::display_name_mention;

/// Map from the display name inserted in the text to the accepted user.
#[derive(Debug, Clone, Default)]
pub struct DisplayNameMap {
    users: HashMap<String, CandidateUser>,
}

impl DisplayNameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the author accepted `user` from the suggestion list and
    /// return the plain-text mention to insert into the text.
    ///
    /// The map key is the bracket-stripped display name, i.e. exactly the
    /// name that appears between `@[` and `]` in the inserted mention.
    pub fn accept(&mut self, user: CandidateUser) -> String {
        let mention = display_name_mention(user.display_name.as_deref().unwrap_or_default());
        // `@[` prefix and `]` suffix off again: the key is the bare name.
        let name = mention[2..mention.len() - 1].to_string();
        self.users.insert(name, user);
        mention
    }

    pub fn get(&self, display_name: &str) -> Option<&CandidateUser> {
        self.users.get(display_name)
    }

    pub fn insert(&mut self, display_name: impl Into<String>, user: CandidateUser) {
        self.users.insert(display_name.into(), user);
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }
}
