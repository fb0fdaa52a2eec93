//! Sled Common Library
//!
//! Shared configuration loading and logging bootstrap for the sled tooling
//! crates (`sled_mchgen`, `sled_profile`).
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and types
//! - [`logging`] - tracing-subscriber setup shared by all binaries
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use sled_common::config::{ConfigLoader, SharedConfig};
//! use sled_common::logging::LogOptions;
//! ```

pub mod config;
pub mod logging;
pub mod prelude;
