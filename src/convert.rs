//! Conversion driver.
//!
//! Feeds database lines through [`Record::parse`] into the [`Model`], then
//! runs the integrity check. One [`Converter`] handles one database.

use crate::db::{AccessGrant, Privilege, Record, decode_mode_lock};
use crate::error::{ConvertError, ConvertResult, RecordError};
use crate::model::{Model, unix_nanos};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, trace};

/// `MDU` key holding an account's vhost.
const MD_USER_CLOAK: &str = "private:usercloak";
/// `MDC` keys holding the persisted topic.
const MD_TOPIC_TEXT: &str = "private:topic:text";
const MD_TOPIC_SETTER: &str = "private:topic:setter";
const MD_TOPIC_TS: &str = "private:topic:ts";

/// Record counts gathered while reading a database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub lines: usize,
    /// Recognized records by tag.
    pub records: BTreeMap<&'static str, usize>,
    /// Lines with a tag this converter does not handle.
    pub ignored: usize,
}

impl ConvertStats {
    pub fn log(&self) {
        info!(
            lines = self.lines,
            ignored = self.ignored,
            records = ?self.records,
            "Database read"
        );
    }
}

/// A finished, validated conversion.
#[derive(Debug)]
pub struct Conversion {
    pub model: Model,
    pub stats: ConvertStats,
}

/// Incremental conversion state.
#[derive(Debug, Default)]
pub struct Converter {
    model: Model,
    stats: ConvertStats,
}

impl Converter {
    pub fn new() -> Self {
        Self {
            model: Model::new(),
            stats: ConvertStats::default(),
        }
    }

    /// Process one line. `line_no` is 1-based and only used for errors.
    pub fn feed(&mut self, line_no: usize, line: &str) -> ConvertResult<()> {
        self.stats.lines += 1;
        let line = line.trim_end_matches(['\r', '\n']);

        let record = Record::parse(line).map_err(|source| ConvertError::Record {
            line: line_no,
            source,
        })?;
        let Some(record) = record else {
            self.stats.ignored += 1;
            return Ok(());
        };

        *self.stats.records.entry(record.tag()).or_default() += 1;
        self.apply(record).map_err(|source| ConvertError::Record {
            line: line_no,
            source,
        })
    }

    /// Apply a decoded record to the model.
    pub fn apply(&mut self, record: Record<'_>) -> Result<(), RecordError> {
        match record {
            Record::Account(account) => {
                let registered_at = unix_nanos(account.registered)?;
                self.model
                    .user_mut(account.name)
                    .register(account.hash, account.email, registered_at);
            }
            Record::GroupedNick { account, nick } => {
                if account == nick {
                    trace!(account, "Skipping account's own nick");
                } else {
                    self.model.user_mut(account).group_nick(nick);
                }
            }
            Record::AccountMetadata {
                account,
                key,
                value,
            } => {
                if key == MD_USER_CLOAK {
                    self.model.user_mut(account).set_vhost(value);
                }
            }
            Record::Channel(channel) => {
                let registered_at = unix_nanos(channel.registered)?;
                let modes = decode_mode_lock(channel.mlock_on, channel.mlock_off);
                self.model.channel_mut(channel.name).register(
                    registered_at,
                    channel.key,
                    modes,
                    channel.limit,
                );
            }
            Record::ChannelMetadata {
                channel,
                key,
                value,
            } => match key {
                MD_TOPIC_TEXT => {
                    self.model.channel_mut(channel).topic = Some(value.to_string());
                }
                MD_TOPIC_SETTER => {
                    self.model.channel_mut(channel).topic_set_by = Some(value.to_string());
                }
                MD_TOPIC_TS => {
                    let secs = value.parse().map_err(|_| RecordError::InvalidInteger {
                        tag: "MDC",
                        field: MD_TOPIC_TS,
                        value: value.to_string(),
                    })?;
                    self.model.channel_mut(channel).topic_set_at = Some(unix_nanos(secs)?);
                }
                _ => {}
            },
            Record::Access(access) => {
                // Every CA line registers the channel and its access list,
                // even if it grants nothing.
                self.model.channel_mut(access.channel).access_list_mut();

                let Some(grant) = AccessGrant::from_flags(access.flags) else {
                    trace!(
                        channel = access.channel,
                        account = access.account,
                        flags = access.flags,
                        "Access entry grants no amode"
                    );
                    return Ok(());
                };

                if grant == AccessGrant::Founder
                    && !self
                        .model
                        .claim_founder(access.channel, access.account, access.set_at)
                {
                    debug!(
                        channel = access.channel,
                        account = access.account,
                        set_at = access.set_at,
                        "Founder claim superseded by an earlier one"
                    );
                }

                let privilege = grant.privilege();
                let previous = self
                    .model
                    .channel_mut(access.channel)
                    .set_access(access.account, privilege);
                if let Some(previous) = previous.filter(|p| *p != privilege) {
                    log_replaced_access(access.channel, access.account, previous, privilege);
                }
            }
        }
        Ok(())
    }

    /// Run the integrity check and hand back the model.
    pub fn finish(self) -> ConvertResult<Conversion> {
        self.model.check_integrity()?;
        Ok(Conversion {
            model: self.model,
            stats: self.stats,
        })
    }
}

fn log_replaced_access(channel: &str, account: &str, previous: Privilege, privilege: Privilege) {
    debug!(
        channel,
        account,
        previous = %previous.letter(),
        privilege = %privilege.letter(),
        "Access entry replaced earlier amode"
    );
}

/// Convert the database at `path`, reading it line by line.
pub fn convert_file(path: &Path) -> ConvertResult<Conversion> {
    let read_error = |source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(read_error)?);
    let mut converter = Converter::new();
    for (index, line) in reader.lines().enumerate() {
        converter.feed(index + 1, &line.map_err(read_error)?)?;
    }
    converter.finish()
}
