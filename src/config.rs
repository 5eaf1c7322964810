//! Command-line configuration.
//!
//! The converter takes exactly two positional arguments and nothing else: no
//! `--help`/`--version`, and paths starting with `-` are taken literally.
//! `RUST_LOG` only controls log verbosity.

use clap::Parser;
use std::path::PathBuf;

/// Convert an Atheme services database to a JSON export.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "atheme2json",
    about,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Config {
    /// Atheme flat-file database (usually `services.db`).
    #[arg(value_name = "ATHEME_DB", allow_hyphen_values = true)]
    pub input: PathBuf,

    /// Where to write the JSON export.
    #[arg(value_name = "OUTPUT_JSON", allow_hyphen_values = true)]
    pub output: PathBuf,
}

impl Config {
    /// Load configuration from the process arguments.
    ///
    /// Exits with a usage message when the arguments are wrong.
    pub fn load() -> Self {
        Self::parse()
    }
}
