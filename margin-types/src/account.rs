//! Helpers for `acct:` account identifiers.
//!
//! User identities are represented as `acct:{username}@{authority}`, where
//! the authority is the instance the account belongs to.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("account id does not start with acct: {0}")]
    MissingPrefix(String),
    #[error("account id has no authority: {0}")]
    MissingAuthority(String),
}

/// A decomposed `acct:` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId {
    pub username: String,
    pub authority: String,
}

/// Build the account id for a username on a given authority.
pub fn build_account_id(username: &str, authority: &str) -> String {
    format!("acct:{username}@{authority}")
}

/// Split an `acct:{username}@{authority}` id into its parts.
///
/// Usernames never contain `@`, so the split happens at the last one.
pub fn parse_account_id(userid: &str) -> Result<AccountId, AccountIdError> {
    let rest = userid
        .strip_prefix("acct:")
        .ok_or_else(|| AccountIdError::MissingPrefix(userid.to_string()))?;
    let (username, authority) = rest
        .rsplit_once('@')
        .ok_or_else(|| AccountIdError::MissingAuthority(userid.to_string()))?;

    Ok(AccountId {
        username: username.to_string(),
        authority: authority.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_account_id() {
        assert_eq!(
            build_account_id("jane.doe", "hypothes.is"),
            "acct:jane.doe@hypothes.is"
        );
    }

    #[test]
    fn parses_account_id() {
        let parsed = parse_account_id("acct:jane.doe@hypothes.is").unwrap();
        assert_eq!(parsed.username, "jane.doe");
        assert_eq!(parsed.authority, "hypothes.is");
    }

    #[test]
    fn rejects_missing_prefix() {
        assert_eq!(
            parse_account_id("jane@example.com"),
            Err(AccountIdError::MissingPrefix("jane@example.com".to_string()))
        );
    }

    #[test]
    fn rejects_missing_authority() {
        assert_eq!(
            parse_account_id("acct:jane"),
            Err(AccountIdError::MissingAuthority("acct:jane".to_string()))
        );
    }
}
