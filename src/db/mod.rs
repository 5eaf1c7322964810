//! Atheme flat-file database decoding.
//!
//! Atheme persists services state as one record per line, fields separated by
//! a single space, with a short uppercase tag in front:
//! - `MU`/`MN`/`MDU`: NickServ accounts, grouped nicknames, account metadata
//! - `MC`/`MDC`/`CA`: ChanServ registrations, channel metadata, access lists
//!
//! Everything else Atheme writes (`DBV`, `CF`, `KL`, `SO`, ...) is skipped.

mod flags;
mod records;

pub use flags::{AccessGrant, Privilege, decode_mode_lock};
pub use records::Record;
