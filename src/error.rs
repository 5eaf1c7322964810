//! Unified error handling for atheme2json.
//!
//! Errors are layered: [`RecordError`] describes what is wrong with a single
//! database line, [`ConvertError`] is what a conversion run fails with. Every
//! error is fatal; there is no per-record recovery.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Record Errors (single database line)
// ============================================================================

/// Errors raised while decoding one record of a recognized type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{tag} record is missing field {index} ({field})")]
    MissingField {
        tag: &'static str,
        index: usize,
        field: &'static str,
    },

    #[error("{tag} record has non-integer {field}: {value:?}")]
    InvalidInteger {
        tag: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("timestamp {0} is outside the representable nanosecond range")]
    TimestampOutOfRange(i64),
}

impl RecordError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::InvalidInteger { .. } => "invalid_integer",
            Self::TimestampOutOfRange(_) => "timestamp_out_of_range",
        }
    }
}

// ============================================================================
// Conversion Errors (whole run)
// ============================================================================

/// Errors that abort a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("no user corresponding to founder {founder} of channel {channel}")]
    FounderNotRegistered { channel: String, founder: String },

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ConvertError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read_error",
            Self::Write { .. } => "write_error",
            Self::Record { source, .. } => source.error_code(),
            Self::FounderNotRegistered { .. } => "founder_not_registered",
            Self::Encode(_) => "encode_error",
        }
    }
}

/// Result type for a conversion run.
pub type ConvertResult<T> = Result<T, ConvertError>;
