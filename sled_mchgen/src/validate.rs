//! Schema consistency checks.
//!
//! The loader accepts any document that can be turned into a [`Schema`];
//! this pass reports everything that would make the generated C fail to
//! compile or behave unexpectedly. It runs separately from loading so the
//! caller decides whether issues block generation.

use crate::naming::{Naming, is_c_identifier};
use crate::schema::Schema;
use serde::Serialize;
use std::collections::HashSet;

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Whether this blocks generation in strict mode.
    pub severity: Severity,
    /// Schema location, e.g. `states[2]`.
    pub location: String,
    pub message: String,
}

/// Severity of an [`Issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Generated code would not compile or would misbehave.
    Error,
    /// Advisory only.
    Warning,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        };
        write!(f, "[{}] {}: {}", tag, self.location, self.message)
    }
}

/// Validate a [`Schema`] and return all problems found.
pub fn validate(schema: &Schema) -> Vec<Issue> {
    let mut issues = Vec::new();

    validate_prefix(schema, &mut issues);
    validate_tags(schema, &mut issues);
    validate_initial(schema, &mut issues);
    validate_members(schema, &mut issues);

    issues
}

/// Returns `true` if `validate()` produces no `Error`-severity issues.
pub fn is_valid(schema: &Schema) -> bool {
    !validate(schema)
        .iter()
        .any(|issue| issue.severity == Severity::Error)
}

fn error(issues: &mut Vec<Issue>, location: String, message: String) {
    issues.push(Issue {
        severity: Severity::Error,
        location,
        message,
    });
}

fn validate_prefix(schema: &Schema, issues: &mut Vec<Issue>) {
    if !is_c_identifier(&schema.prefix) {
        error(
            issues,
            "prefix".to_string(),
            format!("'{}' is not a valid C identifier", schema.prefix),
        );
    }
}

fn validate_tags(schema: &Schema, issues: &mut Vec<Issue>) {
    // Event and state tags share the C enumerator namespace.
    let mut seen: HashSet<&str> = HashSet::new();

    for (group, tags) in [("events", &schema.events), ("states", &schema.states)] {
        if tags.is_empty() {
            error(
                issues,
                group.to_string(),
                format!("no {group} declared; an empty enum does not compile"),
            );
        }
        for (idx, tag) in tags.iter().enumerate() {
            let location = format!("{group}[{idx}]");
            if !is_c_identifier(tag) {
                error(
                    issues,
                    location.clone(),
                    format!("'{tag}' is not a valid C identifier"),
                );
            }
            if !seen.insert(tag) {
                error(issues, location, format!("duplicate enumerator '{tag}'"));
            }
        }
    }

    let mut callbacks: HashSet<&str> = HashSet::new();
    for (idx, callback) in schema.callbacks.iter().enumerate() {
        let location = format!("callbacks[{idx}]");
        if !is_c_identifier(callback) {
            error(
                issues,
                location.clone(),
                format!("'{callback}' is not a valid C identifier"),
            );
        }
        if !callbacks.insert(callback) {
            error(issues, location, format!("duplicate callback '{callback}'"));
        }
    }
}

fn validate_initial(schema: &Schema, issues: &mut Vec<Issue>) {
    if !schema.initial_is_declared() {
        error(
            issues,
            "initial".to_string(),
            format!("initial state '{}' is not a declared state", schema.initial),
        );
    }
    for (idx, extra) in schema.redundant_initials.iter().enumerate() {
        issues.push(Issue {
            severity: Severity::Warning,
            location: format!("initial[{}]", idx + 1),
            message: format!("extra initial '{extra}' ignored"),
        });
    }
}

fn validate_members(schema: &Schema, issues: &mut Vec<Issue>) {
    let naming = Naming::new(&schema.prefix);

    let mut reserved: Vec<String> = vec!["state".to_string(), "payload".to_string()];
    reserved.extend(schema.callbacks.iter().map(|cb| naming.handler_slot(cb)));

    let mut seen: HashSet<&str> = HashSet::new();
    let members = schema
        .fields
        .iter()
        .enumerate()
        .map(|(idx, f)| ("fields", idx, f.ty.as_str(), f.name.as_str()))
        .chain(
            schema
                .field_decls
                .iter()
                .enumerate()
                .map(|(idx, f)| ("field_decls", idx, f.ty.as_str(), f.name.as_str())),
        );

    for (group, idx, ty, name) in members {
        let location = format!("{group}[{idx}]");

        if ty.trim().is_empty() {
            error(issues, location.clone(), format!("member '{name}' has an empty type"));
        }
        if !is_c_identifier(name) {
            error(
                issues,
                location.clone(),
                format!("'{name}' is not a valid C identifier"),
            );
        }
        if reserved.iter().any(|r| r == name) {
            error(
                issues,
                location,
                format!("member '{name}' collides with a generated struct member"),
            );
        } else if !seen.insert(name) {
            error(issues, location, format!("duplicate member '{name}'"));
        }
    }
}
