//! JSON export document.
//!
//! The document is written to a temporary file next to the destination and
//! renamed into place once fully serialized, so a failed run never leaves a
//! truncated export behind.

use crate::error::{ConvertError, ConvertResult};
use crate::model::{Channel, Model, User};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Export format version understood by the importer.
pub const EXPORT_VERSION: u32 = 1;

/// Origin system recorded in the export.
pub const EXPORT_SOURCE: &str = "atheme";

/// Top-level export document.
#[derive(Debug, Serialize)]
pub struct Export<'a> {
    pub version: u32,
    pub source: &'static str,
    pub users: &'a BTreeMap<String, User>,
    pub channels: &'a BTreeMap<String, Channel>,
}

impl<'a> Export<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self {
            version: EXPORT_VERSION,
            source: EXPORT_SOURCE,
            users: model.users(),
            channels: model.channels(),
        }
    }

    /// Write the document to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> ConvertResult<()> {
        let write_error = |source| ConvertError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, self)?;
            writer.flush().map_err(write_error)?;
        }

        tmp.persist(path).map_err(|e| write_error(e.error))?;
        Ok(())
    }
}
