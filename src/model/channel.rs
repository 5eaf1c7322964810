//! Migrated ChanServ registration.

use crate::db::Privilege;
use serde::Serialize;
use std::collections::BTreeMap;

/// A registered channel as it appears in the export.
///
/// Channels can be created by `MDC`/`CA` lines before (or without) their `MC`
/// line, so registration fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub name: String,
    /// Nanoseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modes: Option<String>,
    /// User limit; `0` is kept as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_set_by: Option<String>,
    /// Nanoseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_set_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founder: Option<String>,
    /// Account name -> standing prefix mode. Present once any `CA` entry
    /// referenced the channel, even if none of them granted a mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amode: Option<BTreeMap<String, Privilege>>,
}

impl Channel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Apply a channel registration.
    ///
    /// An empty key leaves any previously stored key untouched.
    pub fn register(&mut self, registered_at: i64, key: &str, modes: String, limit: u32) {
        self.registered_at = Some(registered_at);
        if !key.is_empty() {
            self.key = Some(key.to_string());
        }
        self.modes = Some(modes);
        self.limit = Some(limit);
    }

    /// Start the access list, keeping any existing entries.
    pub fn access_list_mut(&mut self) -> &mut BTreeMap<String, Privilege> {
        self.amode.get_or_insert_default()
    }

    /// Set the standing privilege of an account, replacing any previous one.
    pub fn set_access(&mut self, account: &str, privilege: Privilege) -> Option<Privilege> {
        self.access_list_mut().insert(account.to_string(), privilege)
    }

    /// Standing privilege of an account, if any.
    #[cfg(test)]
    pub fn access(&self, account: &str) -> Option<Privilege> {
        self.amode.as_ref()?.get(account).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_suppresses_empty_key() {
        let mut channel = Channel::new("#test");
        channel.register(1_000_000_000, "", "nt".into(), 0);
        assert_eq!(channel.key, None);
        assert_eq!(channel.limit, Some(0));
        assert_eq!(channel.modes.as_deref(), Some("nt"));
    }

    #[test]
    fn test_register_keeps_earlier_key() {
        let mut channel = Channel::new("#test");
        channel.register(1, "hunter2", "nt".into(), 5);
        channel.register(2, "", "nt".into(), 5);
        assert_eq!(channel.key.as_deref(), Some("hunter2"));
        assert_eq!(channel.registered_at, Some(2));
    }

    #[test]
    fn test_set_access_replaces() {
        let mut channel = Channel::new("#test");
        assert_eq!(channel.set_access("alice", Privilege::Op), None);
        assert_eq!(
            channel.set_access("alice", Privilege::Voice),
            Some(Privilege::Op)
        );
        assert_eq!(channel.access("alice"), Some(Privilege::Voice));
        assert_eq!(channel.amode.as_ref().map(BTreeMap::len), Some(1));
    }

    #[test]
    fn test_access_list_without_grants() {
        let mut channel = Channel::new("#test");
        assert_eq!(serde_json::to_value(&channel).unwrap().get("amode"), None);

        channel.access_list_mut();
        let json = serde_json::to_value(&channel).unwrap();
        assert_eq!(json["amode"], serde_json::json!({}));
        assert_eq!(channel.access("alice"), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut channel = Channel::new("#test");
        channel.register(1_000_000_000, "k", "int".into(), 10);
        channel.topic = Some("hello world".into());
        channel.topic_set_by = Some("alice".into());
        channel.topic_set_at = Some(2_000_000_000);
        channel.founder = Some("alice".into());
        channel.set_access("alice", Privilege::Owner);

        let json = serde_json::to_value(&channel).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "#test",
                "registeredAt": 1_000_000_000i64,
                "key": "k",
                "modes": "int",
                "limit": 10,
                "topic": "hello world",
                "topicSetBy": "alice",
                "topicSetAt": 2_000_000_000i64,
                "founder": "alice",
                "amode": { "alice": "q" },
            })
        );
    }
}
