//! atheme2json - Atheme services database to JSON export
//!
//! Reads an Atheme flat-file database, rebuilds its accounts and channel
//! registrations in memory, checks that every channel founder is a known
//! account, and writes a single JSON document for import into other services.

mod config;
mod convert;
mod db;
mod error;
mod export;
mod model;
mod telemetry;

use crate::config::Config;
use crate::error::ConvertResult;
use crate::export::Export;
use crate::telemetry::spans;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = Config::load();

    run(&config).map_err(|e| {
        error!(error = %e, code = e.error_code(), "Conversion failed");
        e
    })?;

    Ok(())
}

fn run(config: &Config) -> ConvertResult<()> {
    let _span = spans::conversion(&config.input, &config.output).entered();

    info!("Reading Atheme database");
    let conversion = convert::convert_file(&config.input)?;
    conversion.stats.log();

    Export::new(&conversion.model).write_to(&config.output)?;
    info!(
        users = conversion.model.users().len(),
        channels = conversion.model.channels().len(),
        "Export written"
    );

    Ok(())
}
