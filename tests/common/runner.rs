//! Test conversion runs.
//!
//! Each [`TestRun`] owns a temporary directory holding the input database and
//! the output location, and invokes the converter binary as a child process.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Scratch directory for one conversion.
pub struct TestRun {
    dir: TempDir,
    input: PathBuf,
    output: PathBuf,
}

/// Result of running the converter.
pub struct Outcome {
    pub output: Output,
}

#[allow(dead_code)]
impl Outcome {
    pub fn success(&self) -> bool {
        self.output.status.success()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }
}

#[allow(dead_code)]
impl TestRun {
    /// Create a run whose input database holds `db`.
    pub fn new(db: &str) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("services.db");
        let output = dir.path().join("export.json");
        std::fs::write(&input, db)?;
        Ok(Self { dir, input, output })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Run the converter with the standard input/output arguments.
    pub fn convert(&self) -> anyhow::Result<Outcome> {
        let input = self.input.to_string_lossy().into_owned();
        let output = self.output.to_string_lossy().into_owned();
        Self::run_with_args(&[&input, &output])
    }

    /// Run the converter with arbitrary arguments.
    pub fn run_with_args(args: &[&str]) -> anyhow::Result<Outcome> {
        Self::run_in(&std::env::current_dir()?, args)
    }

    /// Run the converter from `dir` with arbitrary arguments.
    pub fn run_in(dir: &Path, args: &[&str]) -> anyhow::Result<Outcome> {
        let output = Command::new(env!("CARGO_BIN_EXE_atheme2json"))
            .args(args)
            .current_dir(dir)
            .env("RUST_LOG", "debug")
            .output()?;
        Ok(Outcome { output })
    }

    /// Parse the written export.
    pub fn export(&self) -> anyhow::Result<serde_json::Value> {
        let content = std::fs::read_to_string(&self.output)?;
        Ok(serde_json::from_str(&content)?)
    }
}
