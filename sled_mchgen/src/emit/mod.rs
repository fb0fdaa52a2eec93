//! C emitters for the interface (`.h`) and implementation (`.c`) modules.
//!
//! Both emitters are pure: the same [`Schema`] and [`EmitOptions`] always
//! produce byte-identical text. They never talk to each other; agreement on
//! symbol names comes from [`crate::naming`].

mod implementation;
mod interface;

pub use implementation::{emit_implementation, emit_implementation_with};
pub use interface::emit_interface;

use crate::schema::Schema;

/// First line of every generated file.
pub const GENERATED_WARNING: &str = "// WARNING: Automatically generated file! Do not modify!";

/// Knobs that change the implementation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Include line target for the paired interface; `<prefix>.h` when unset.
    pub interface_include: Option<String>,
    /// Emit the `syslog(LOG_DEBUG, ...)` state change trace.
    pub debug_trace: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            interface_include: None,
            debug_trace: true,
        }
    }
}

/// The matched pair of generated texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub interface: String,
    pub implementation: String,
}

/// Emit both modules for `schema`.
pub fn emit(schema: &Schema, options: &EmitOptions) -> Artifacts {
    Artifacts {
        interface: emit_interface(schema),
        implementation: emit_implementation_with(schema, options),
    }
}

/// Line-oriented text buffer with tab indentation.
#[derive(Debug, Default)]
struct CodeWriter {
    out: String,
}

impl CodeWriter {
    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn indented(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.out.push('\t');
        }
        self.line(text);
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}
