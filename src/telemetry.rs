//! Logging setup and span constructors.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Logs go to stderr so they never mix with anything written to stdout.
/// Verbosity follows `RUST_LOG`, defaulting to `info`.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Standardized span constructors.
pub mod spans {
    use std::path::Path;
    use tracing::{Span, info_span};

    /// Create a span for one conversion run.
    pub fn conversion(input: &Path, output: &Path) -> Span {
        info_span!("conversion", input = %input.display(), output = %output.display())
    }
}
