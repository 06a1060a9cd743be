//! Log output.
//!
//! The validator reports its progress through [tracing]. Failed lookups
//! and cancellation are logged at WARN, pass summaries at DEBUG, and every
//! single `_psl` lookup at TRACE. Nothing is printed unless a subscriber
//! is installed, e.g., via [`init_logging`].

use tracing_subscriber::EnvFilter;

/// The filter used if RUST_LOG isn’t set.
pub const DEFAULT_DIRECTIVES: &str = "psl_validate=warn";

/// Sets up logging to stderr with the default filter.
///
/// Use the RUST_LOG environment variable to override the default.
///
/// E.g. To see a summary of each validation pass:
///   RUST_LOG=psl_validate=DEBUG
///
/// Or to follow every `_psl` lookup:
///   RUST_LOG=psl_validate::lookup=TRACE
///
/// Or to also see what the stub resolver is doing:
///   RUST_LOG=psl_validate=DEBUG,domain=TRACE
///
/// Only the first call installs a subscriber. Later calls do nothing.
pub fn init_logging() {
    init_logging_with(DEFAULT_DIRECTIVES)
}

/// Sets up logging to stderr, filtering by `directives` unless RUST_LOG
/// is set.
///
/// Invalid directives are ignored.
pub fn init_logging_with(directives: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(directives))
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .try_init()
        .ok();
}

fn filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives))
}

//============ Testing =======================================================
