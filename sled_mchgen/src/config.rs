//! Generator configuration (`mchgen.toml`).
//!
//! ```toml
//! [shared]
//! log_level = "debug"
//!
//! [generator]
//! strict = true
//! debug_trace = true
//! interface_include = "machines/mch_mp.h"
//! ```
//!
//! Every key is optional. CLI flags are applied on top with
//! [`GeneratorConfig::apply_overrides`].

use crate::emit::EmitOptions;
use serde::{Deserialize, Serialize};
use sled_common::config::SharedConfig;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub shared: SharedConfig,
    #[serde(default)]
    pub generator: GeneratorSection,
}

/// `[generator]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSection {
    /// Validation errors abort generation.
    #[serde(default = "default_true")]
    pub strict: bool,
    /// Emit the syslog state change trace.
    #[serde(default = "default_true")]
    pub debug_trace: bool,
    /// Include line target for the interface in the implementation.
    #[serde(default)]
    pub interface_include: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            strict: true,
            debug_trace: true,
            interface_include: None,
        }
    }
}

impl GeneratorConfig {
    /// Apply CLI switches. Flags can only relax `strict` and disable tracing.
    pub fn apply_overrides(&mut self, permissive: bool, no_trace: bool) {
        if permissive {
            self.generator.strict = false;
        }
        if no_trace {
            self.generator.debug_trace = false;
        }
    }

    /// Emitter options, falling back to `default_include` when the file
    /// does not name an interface include.
    pub fn emit_options(&self, default_include: Option<String>) -> EmitOptions {
        EmitOptions {
            interface_include: self
                .generator
                .interface_include
                .clone()
                .or(default_include),
            debug_trace: self.generator.debug_trace,
        }
    }
}
