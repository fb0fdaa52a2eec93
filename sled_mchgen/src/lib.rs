//! # Sled Machine Generator
//!
//! Turns a declarative state machine schema (XML) into a matched pair of C
//! modules: a public interface and an implementation. Every machine in the
//! sled firmware gets the same lifecycle, introspection, and dispatch
//! contract; the per-machine transition decision and enter/exit hooks are
//! written by hand against the declarations this crate emits.
//!
//! # Module Structure
//!
//! - [`schema`] - Schema Model
//! - [`loader`] - XML schema loader
//! - [`validate`] - Consistency checks, decoupled from loading
//! - [`naming`] - Single source of truth for generated symbol names
//! - [`emit`] - Interface and implementation emitters
//! - [`output`] - All-or-nothing writing of the file pair
//! - [`generate`] - One complete generation run
//! - [`config`] - `mchgen.toml` options
//! - [`runtime`] - Reference runtime for the generated dispatch protocol
//!
//! # Pipeline
//!
//! ```text
//!  schema.xml ──► loader ──► Schema ──► validate ──► issues
//!                              │
//!                 ┌────────────┴────────────┐
//!                 ▼                         ▼
//!          emit_interface          emit_implementation
//!                 │        naming         │
//!                 ▼                         ▼
//!              fsm.h ◄──── output ────►  fsm.c
//! ```
//!
//! # Usage
//!
//! ```rust
//! use sled_mchgen::{emit_implementation, emit_interface, loader};
//!
//! let schema = loader::parse(r#"
//!     <machine prefix="fsm">
//!       <events><event>Start</event><event>Stop</event></events>
//!       <states><state>Idle</state><state>Running</state></states>
//!       <initial>Idle</initial>
//!     </machine>"#).unwrap();
//!
//! assert!(emit_interface(&schema).contains("void fsm_handle_event(fsm_t *machine, fsm_event_t event);"));
//! assert!(emit_implementation(&schema).contains("machine->state = Idle;"));
//! ```

pub mod config;
pub mod emit;
pub mod error;
pub mod generate;
pub mod loader;
pub mod naming;
pub mod output;
pub mod runtime;
pub mod schema;
pub mod validate;

// Re-export key types for convenience
pub use crate::config::GeneratorConfig;
pub use crate::emit::{Artifacts, EmitOptions, emit_implementation, emit_interface};
pub use crate::error::{MchgenError, SchemaError};
pub use crate::generate::{GenerateReport, GenerateRequest, check, generate};
pub use crate::runtime::{EventCode, Machine, StateCode, Transition, TransitionPolicy};
pub use crate::schema::{Field, FieldDecl, Schema};
pub use crate::validate::{Issue, Severity, is_valid, validate};
