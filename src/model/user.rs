//! Migrated NickServ account.

use serde::Serialize;

/// A registered account as it appears in the export.
///
/// Accounts referenced by `MN`/`MDU` before their `MU` line exist with only a
/// name until the registration arrives; unset fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    /// Password hash, copied verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Nanoseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_nicks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vhost: Option<String>,
}

impl User {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Apply an account registration, keeping grouped nicks and vhost.
    pub fn register(&mut self, hash: &str, email: &str, registered_at: i64) {
        self.hash = Some(hash.to_string());
        self.email = Some(email.to_string());
        self.registered_at = Some(registered_at);
    }

    /// Group a nickname to this account.
    ///
    /// The account name itself is never listed. Repeated nicks are kept.
    pub fn group_nick(&mut self, nick: &str) -> bool {
        if nick == self.name {
            return false;
        }
        self.additional_nicks.push(nick.to_string());
        true
    }

    pub fn set_vhost(&mut self, vhost: &str) {
        self.vhost = Some(vhost.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_keeps_grouped_nicks() {
        let mut user = User::new("shivaram");
        assert!(user.group_nick("slingamn"));
        user.register("$1$hash", "user@example.com", 1_600_134_392_000_000_000);

        assert_eq!(user.hash.as_deref(), Some("$1$hash"));
        assert_eq!(user.email.as_deref(), Some("user@example.com"));
        assert_eq!(user.registered_at, Some(1_600_134_392_000_000_000));
        assert_eq!(user.additional_nicks, vec!["slingamn"]);
    }

    #[test]
    fn test_group_nick_skips_account_name() {
        let mut user = User::new("alice");
        assert!(!user.group_nick("alice"));
        assert!(user.additional_nicks.is_empty());
    }

    #[test]
    fn test_group_nick_keeps_duplicates_in_order() {
        let mut user = User::new("alice");
        user.group_nick("al");
        user.group_nick("ally");
        user.group_nick("al");
        assert_eq!(user.additional_nicks, vec!["al", "ally", "al"]);
    }

    #[test]
    fn test_partial_user_serializes_name_only() {
        let json = serde_json::to_value(User::new("bob")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "bob" }));
    }
}
