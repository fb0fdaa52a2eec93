//! tracing-subscriber setup shared by the sled binaries.
//!
//! Logs always go to stderr: `create_profile` writes its tables to stdout
//! and must not interleave diagnostics with data.

use crate::config::LogLevel;
use tracing_subscriber::EnvFilter;

/// Logging switches collected from CLI flags and the `[shared]` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// Force DEBUG regardless of the configured level.
    pub verbose: bool,
    /// Output logs in JSON format.
    pub json: bool,
    /// Level from configuration.
    pub level: LogLevel,
}

impl LogOptions {
    /// Effective level after the verbose override.
    pub fn effective_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            self.level.as_tracing()
        }
    }
}

/// Install the global subscriber. `RUST_LOG` directives are honoured on top
/// of the configured level. A second call is a no-op.
pub fn init(options: &LogOptions) {
    let filter = EnvFilter::from_default_env().add_directive(options.effective_level().into());

    let result = if options.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
