//! Record tokenizing and routing.
//!
//! A line is split on single spaces with no quoting or escaping. `MDC` records,
//! whose last field may be topic text, are split into a fixed number of fields
//! so the value keeps its spaces.

use crate::error::RecordError;
use std::str::FromStr;

/// `MU <id> <name> <hash> <email> <registered> <lastseen> <flags> <language>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord<'a> {
    pub name: &'a str,
    pub hash: &'a str,
    pub email: &'a str,
    /// Registration time, seconds since the epoch.
    pub registered: i64,
}

/// `MC <name> <registered> <lastused> <flags> <mlock_on> <mlock_off> <limit> [<key>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord<'a> {
    pub name: &'a str,
    pub registered: i64,
    pub mlock_on: u32,
    pub mlock_off: u32,
    pub limit: u32,
    /// Empty when the channel has no key; Atheme may also omit the field.
    pub key: &'a str,
}

/// `CA <channel> <account> <flags> <set_at> <setter>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRecord<'a> {
    pub channel: &'a str,
    pub account: &'a str,
    pub flags: &'a str,
    pub set_at: i64,
}

/// A decoded database line of a recognized type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record<'a> {
    /// `MU`: account registration.
    Account(AccountRecord<'a>),
    /// `MN <account> <nick> <registered> <lastseen>`: grouped nickname.
    GroupedNick { account: &'a str, nick: &'a str },
    /// `MDU <account> <key> <value>`: account metadata.
    AccountMetadata {
        account: &'a str,
        key: &'a str,
        value: &'a str,
    },
    /// `MC`: channel registration.
    Channel(ChannelRecord<'a>),
    /// `MDC <channel> <key> <value...>`: channel metadata.
    ChannelMetadata {
        channel: &'a str,
        key: &'a str,
        value: &'a str,
    },
    /// `CA`: channel access entry.
    Access(AccessRecord<'a>),
}

impl<'a> Record<'a> {
    /// Decode a line with its terminator already stripped.
    ///
    /// Returns `Ok(None)` for tags this converter does not handle.
    pub fn parse(line: &'a str) -> Result<Option<Self>, RecordError> {
        let tag = line.split(' ').next().unwrap_or_default();

        let record = match tag {
            "MU" => {
                let f = Fields::split("MU", line);
                Record::Account(AccountRecord {
                    name: f.get(2, "name")?,
                    hash: f.get(3, "hash")?,
                    email: f.get(4, "email")?,
                    registered: f.int(5, "registered")?,
                })
            }
            "MN" => {
                let f = Fields::split("MN", line);
                Record::GroupedNick {
                    account: f.get(1, "account")?,
                    nick: f.get(2, "nick")?,
                }
            }
            "MDU" => {
                let f = Fields::split("MDU", line);
                Record::AccountMetadata {
                    account: f.get(1, "account")?,
                    key: f.get(2, "key")?,
                    value: f.get(3, "value")?,
                }
            }
            "MC" => {
                let f = Fields::split("MC", line);
                Record::Channel(ChannelRecord {
                    name: f.get(1, "name")?,
                    registered: f.int(2, "registered")?,
                    mlock_on: f.int(5, "mlock_on")?,
                    mlock_off: f.int(6, "mlock_off")?,
                    limit: f.int(7, "limit")?,
                    key: f.get(8, "key").unwrap_or_default(),
                })
            }
            "MDC" => {
                let f = Fields::split_value("MDC", line);
                Record::ChannelMetadata {
                    channel: f.get(1, "channel")?,
                    key: f.get(2, "key")?,
                    value: f.get(3, "value")?,
                }
            }
            "CA" => {
                let f = Fields::split("CA", line);
                Record::Access(AccessRecord {
                    channel: f.get(1, "channel")?,
                    account: f.get(2, "account")?,
                    flags: f.get(3, "flags")?,
                    set_at: f.int(4, "set_at")?,
                })
            }
            _ => return Ok(None),
        };

        Ok(Some(record))
    }

    /// The tag this record was read from.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Account(_) => "MU",
            Self::GroupedNick { .. } => "MN",
            Self::AccountMetadata { .. } => "MDU",
            Self::Channel(_) => "MC",
            Self::ChannelMetadata { .. } => "MDC",
            Self::Access(_) => "CA",
        }
    }
}

/// Positional fields of one record.
struct Fields<'a> {
    tag: &'static str,
    parts: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    /// Channel metadata: tag, channel, key, then the rest of the line.
    const VALUE_FIELDS: usize = 4;

    fn split(tag: &'static str, line: &'a str) -> Self {
        Self {
            tag,
            parts: line.split(' ').collect(),
        }
    }

    fn split_value(tag: &'static str, line: &'a str) -> Self {
        Self {
            tag,
            parts: line.splitn(Self::VALUE_FIELDS, ' ').collect(),
        }
    }

    fn get(&self, index: usize, field: &'static str) -> Result<&'a str, RecordError> {
        self.parts
            .get(index)
            .copied()
            .ok_or(RecordError::MissingField {
                tag: self.tag,
                index,
                field,
            })
    }

    fn int<T: FromStr>(&self, index: usize, field: &'static str) -> Result<T, RecordError> {
        let value = self.get(index, field)?;
        value.parse().map_err(|_| RecordError::InvalidInteger {
            tag: self.tag,
            field,
            value: value.to_string(),
        })
    }
}
