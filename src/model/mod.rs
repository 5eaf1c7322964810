//! In-memory services model built from the database records.
//!
//! The [`Model`] owns every account and channel for one conversion. Entities
//! are created on first reference through [`Model::user_mut`] and
//! [`Model::channel_mut`]; nothing is ever removed.

mod channel;
mod user;

pub use channel::Channel;
pub use user::User;

use crate::error::{ConvertError, ConvertResult, RecordError};
use chrono::DateTime;
use std::collections::{BTreeMap, HashMap};

/// Convert an Atheme timestamp (seconds) to nanoseconds since the epoch.
pub fn unix_nanos(secs: i64) -> Result<i64, RecordError> {
    DateTime::from_timestamp(secs, 0)
        .and_then(|dt| dt.timestamp_nanos_opt())
        .ok_or(RecordError::TimestampOutOfRange(secs))
}

/// Founder claim currently accepted for a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FounderClaim {
    account: String,
    /// Raw `CA` set-at time, seconds.
    set_at: i64,
}

/// Accounts and channels of one conversion.
#[derive(Debug, Default)]
pub struct Model {
    users: BTreeMap<String, User>,
    channels: BTreeMap<String, Channel>,
    /// Transient founder arbitration state, never exported.
    founders: HashMap<String, FounderClaim>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the named account, creating it on first reference.
    pub fn user_mut(&mut self, name: &str) -> &mut User {
        self.users
            .entry(name.to_string())
            .or_insert_with(|| User::new(name))
    }

    /// Get the named channel, creating it on first reference.
    pub fn channel_mut(&mut self, name: &str) -> &mut Channel {
        self.channels
            .entry(name.to_string())
            .or_insert_with(|| Channel::new(name))
    }

    pub fn users(&self) -> &BTreeMap<String, User> {
        &self.users
    }

    pub fn channels(&self) -> &BTreeMap<String, Channel> {
        &self.channels
    }

    /// Offer `account` as founder of `channel`.
    ///
    /// The first claim is accepted. A later claim replaces it only if it was
    /// set strictly earlier; equal timestamps keep the claim seen first.
    /// Returns whether the claim was accepted.
    pub fn claim_founder(&mut self, channel: &str, account: &str, set_at: i64) -> bool {
        let accepted = self
            .founders
            .get(channel)
            .is_none_or(|current| set_at < current.set_at);
        if !accepted {
            return false;
        }

        self.founders.insert(
            channel.to_string(),
            FounderClaim {
                account: account.to_string(),
                set_at,
            },
        );
        self.channel_mut(channel).founder = Some(account.to_string());
        true
    }

    /// Check that every channel founder is a known account.
    ///
    /// Fails on the first channel (in name order) whose founder is missing.
    pub fn check_integrity(&self) -> ConvertResult<()> {
        for (name, channel) in &self.channels {
            let Some(founder) = &channel.founder else {
                continue;
            };
            if !self.users.contains_key(founder) {
                return Err(ConvertError::FounderNotRegistered {
                    channel: name.clone(),
                    founder: founder.clone(),
                });
            }
        }
        Ok(())
    }
}
