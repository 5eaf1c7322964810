//! Integration test common infrastructure.
//!
//! Provides a harness that runs the built `atheme2json` binary against
//! database files in a scratch directory.

pub mod runner;

#[allow(unused_imports)]
pub use runner::{Outcome, TestRun};
