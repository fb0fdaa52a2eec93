//! Error types for schema loading and code generation.

use crate::validate::Issue;
use sled_common::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// A required part of the schema document is missing or empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Required attribute absent from an element
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Element tag name
        element: String,
        /// Attribute name
        attribute: String,
    },

    /// Required element absent from the document
    #[error("missing required element <{element}>")]
    MissingElement {
        /// Element tag name
        element: String,
    },

    /// Element present but its identifier text is empty
    #[error("<{element}> #{index} has no identifier text")]
    EmptyElement {
        /// Element tag name
        element: String,
        /// Zero-based position among elements of the same group
        index: usize,
    },

    /// Initial state does not name a declared state
    #[error("initial state '{initial}' is not a declared state")]
    UnknownInitial {
        /// The offending initial state
        initial: String,
    },
}

/// Errors that can end a generation run.
#[derive(Error, Debug)]
pub enum MchgenError {
    /// Invalid command line usage
    #[error("Usage error: {0}")]
    Usage(String),

    /// Output or input file could not be opened, written, or renamed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Source IO error
        #[source]
        source: std::io::Error,
    },

    /// Schema document is not well-formed
    #[error("Could not parse {}: {message}", path.display())]
    Parse {
        /// Schema file
        path: PathBuf,
        /// Parser diagnostic
        message: String,
    },

    /// Required schema content missing
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Validation found blocking issues in strict mode
    #[error("Schema validation failed with {} error(s)", .0.len())]
    Validation(Vec<Issue>),

    /// Generator configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Check report could not be serialized
    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

impl MchgenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MchgenError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for generator operations.
pub type Result<T> = std::result::Result<T, MchgenError>;
