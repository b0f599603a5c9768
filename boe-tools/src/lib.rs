/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # BOE Tools
//!
//! Round-trip harness for the BOE codec: read a hex payload, decode it,
//! re-encode the decoded message, and compare the bytes.
//!
//! - [`payload`]: Hex payload files
//! - [`roundtrip`]: Timed decode and re-encode
//! - [`report`]: Byte comparison and rendering

pub mod payload;
pub mod report;
pub mod roundtrip;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Builds the harness log filter from `RUST_LOG`-style directives.
///
/// Empty directives fall back to `info`; invalid ones are skipped.
///
/// # Arguments
/// * `directives` - Comma-separated filter directives
#[must_use]
pub fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

/// Initialize logging for the harness.
///
/// Honours `RUST_LOG`, with `info` as the default level.
pub fn init_logging() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn under_filter<T>(directives: &str, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(log_filter(directives))
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert!(under_filter("", || tracing::enabled!(Level::INFO)));
        assert!(!under_filter("", || tracing::enabled!(Level::DEBUG)));
    }

    #[test]
    fn test_log_filter_honours_env_level() {
        assert!(under_filter("debug", || tracing::enabled!(Level::DEBUG)));
        assert!(!under_filter("warn", || tracing::enabled!(Level::INFO)));
    }
}
