//! Prelude module for common re-exports.
//!
//! ```rust
//! use sled_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::logging::{self, LogOptions};
