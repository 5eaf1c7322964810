//! Mode-lock and access flag decoding.
//!
//! Atheme stores channel mode locks as two bitmasks and access entries as a
//! string of flag letters (see `libathemecore/flags.c`). These are mapped onto
//! the plain channel mode string and the single prefix mode ("amode") the
//! importing services understand.

use serde::Serialize;

// include/atheme/channels.h
const CMODE_INVITE: u32 = 0x001;
const CMODE_NOEXT: u32 = 0x010;
const CMODE_SEC: u32 = 0x080;
const CMODE_TOPIC: u32 = 0x100;

/// Mode-lock bits that survive the migration, in rendering order.
///
/// Every other lock bit is dropped: the channel ends up with the baseline
/// modes and operators can re-apply anything else after import.
const MODE_LOCK_TABLE: &[(u32, char)] = &[
    (CMODE_INVITE, 'i'),
    (CMODE_NOEXT, 'n'),
    (CMODE_SEC, 's'),
    (CMODE_TOPIC, 't'),
];

/// Modes every imported channel starts with (+nt).
const BASELINE_MODES: u32 = CMODE_NOEXT | CMODE_TOPIC;

/// Decode a mode lock into a canonical mode string.
///
/// Baseline modes are applied first, then `mlock_on` adds and `mlock_off`
/// removes, so a bit present in both masks ends up off. Unknown bits are
/// ignored.
pub fn decode_mode_lock(mlock_on: u32, mlock_off: u32) -> String {
    let modes = (BASELINE_MODES | mlock_on) & !mlock_off;
    MODE_LOCK_TABLE
        .iter()
        .filter(|(mask, _)| modes & mask != 0)
        .map(|(_, letter)| *letter)
        .collect()
}

/// Standing privilege granted by a channel access entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Privilege {
    #[serde(rename = "q")]
    Owner,
    #[serde(rename = "o")]
    Op,
    #[serde(rename = "h")]
    HalfOp,
    #[serde(rename = "v")]
    Voice,
}

impl Privilege {
    /// Prefix mode letter for this privilege.
    pub fn letter(self) -> char {
        match self {
            Self::Owner => 'q',
            Self::Op => 'o',
            Self::HalfOp => 'h',
            Self::Voice => 'v',
        }
    }
}

/// What a single access entry contributes to a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessGrant {
    /// `+F`: founder candidate, also receives [`Privilege::Owner`].
    Founder,
    /// A prefix mode without founder rights.
    Amode(Privilege),
}

impl AccessGrant {
    /// Classify an access flag string such as `+AFORafhioqrstv`.
    ///
    /// Only the strongest applicable grant is returned, checked in the order
    /// founder, owner (`q`), op (`o`/`O`), halfop (`h`/`H`), voice (`v`/`V`).
    /// Flag strings carrying none of these (ban exemptions, `+b`, ...) give
    /// `None`.
    pub fn from_flags(flags: &str) -> Option<Self> {
        if is_founder(flags) {
            Some(Self::Founder)
        } else if has_flag(flags, 'q') {
            Some(Self::Amode(Privilege::Owner))
        } else if has_any_flag(flags, &['o', 'O']) {
            Some(Self::Amode(Privilege::Op))
        } else if has_any_flag(flags, &['h', 'H']) {
            Some(Self::Amode(Privilege::HalfOp))
        } else if has_any_flag(flags, &['v', 'V']) {
            Some(Self::Amode(Privilege::Voice))
        } else {
            None
        }
    }

    /// The amode this grant leaves in the access map.
    pub fn privilege(self) -> Privilege {
        match self {
            Self::Founder => Privilege::Owner,
            Self::Amode(privilege) => privilege,
        }
    }
}

/// Check if a flag string contains a specific flag.
fn has_flag(flags: &str, flag: char) -> bool {
    flags.contains(flag)
}

/// Check if a flag string contains any of the given flags.
fn has_any_flag(flags: &str, any: &[char]) -> bool {
    flags.contains(any)
}

/// Check if a flag string grants founder (+F).
fn is_founder(flags: &str) -> bool {
    has_flag(flags, 'F')
}
