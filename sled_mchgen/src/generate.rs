//! One generation run: stage outputs, load, validate, emit, commit.

use crate::config::GeneratorConfig;
use crate::emit;
use crate::error::{MchgenError, Result};
use crate::loader;
use crate::output::OutputPair;
use crate::schema::Schema;
use crate::validate::{Issue, Severity, validate};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Paths for one run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub schema: PathBuf,
    pub interface: PathBuf,
    pub implementation: PathBuf,
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub prefix: String,
    /// Issues that did not block generation.
    pub issues: Vec<Issue>,
}

/// Generate the interface and implementation for `request`.
///
/// Output files are staged before the schema is read; nothing is written
/// to the targets unless every step succeeds.
pub fn generate(request: &GenerateRequest, config: &GeneratorConfig) -> Result<GenerateReport> {
    let outputs = OutputPair::open(&request.interface, &request.implementation)?;

    let (schema, issues) = check(&request.schema)?;
    let blocking = blocking_issues(&issues);
    if !blocking.is_empty() {
        if config.generator.strict {
            return Err(MchgenError::Validation(blocking));
        }
        warn!(
            "Generating '{}' despite {} validation error(s) (permissive mode)",
            schema.prefix,
            blocking.len()
        );
    }

    let options = config.emit_options(outputs.interface_file_name());
    let artifacts = emit::emit(&schema, &options);
    outputs.commit(&artifacts)?;

    info!(
        "Generated '{}': {} events, {} states, {} callbacks",
        schema.prefix,
        schema.events.len(),
        schema.states.len(),
        schema.callbacks.len()
    );
    Ok(GenerateReport {
        prefix: schema.prefix,
        issues,
    })
}

/// Load and validate a schema, logging every issue.
pub fn check(path: &Path) -> Result<(Schema, Vec<Issue>)> {
    let schema = loader::load(path)?;
    let issues = validate(&schema);
    for issue in &issues {
        match issue.severity {
            Severity::Error => error!("{}: {issue}", path.display()),
            Severity::Warning => warn!("{}: {issue}", path.display()),
        }
    }
    Ok((schema, issues))
}

fn blocking_issues(issues: &[Issue]) -> Vec<Issue> {
    issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .cloned()
        .collect()
}
