//! Schema Loader: XML machine description -> [`Schema`].
//!
//! The loader checks only what it needs to build the model (well-formed
//! XML, `prefix`, `initial`, identifier text, field types). Cross-reference
//! checks live in [`crate::validate`] so callers can run them or not.
//!
//! ```xml
//! <machine prefix="mch_intf">
//!   <events><event>EV_INTF_OPEN</event></events>
//!   <states><state>ST_INTF_CLOSED</state></states>
//!   <fields>
//!     <field type="intf_t *">interface</field>
//!     <field_decl type="int" init="0">retries</field_decl>
//!   </fields>
//!   <callbacks><callback>opened</callback></callbacks>
//!   <include>#include "../interface.h"</include>
//!   <initial>ST_INTF_CLOSED</initial>
//! </machine>
//! ```

use crate::error::{MchgenError, Result, SchemaError};
use crate::schema::{Field, FieldDecl, Schema};
use roxmltree::{Document, Node};
use std::path::Path;
use tracing::{debug, warn};

/// Read and parse the schema file at `path`.
pub fn load(path: &Path) -> Result<Schema> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => MchgenError::Parse {
            path: path.to_path_buf(),
            message: "document is not valid UTF-8".to_string(),
        },
        _ => MchgenError::io(path, e),
    })?;
    let schema = parse(&text).map_err(|e| match e {
        MchgenError::Parse { message, .. } => MchgenError::Parse {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })?;

    debug!(
        "Loaded schema '{}' from {}: {} events, {} states, {} fields, {} field decls, {} callbacks",
        schema.prefix,
        path.display(),
        schema.events.len(),
        schema.states.len(),
        schema.fields.len(),
        schema.field_decls.len(),
        schema.callbacks.len(),
    );
    Ok(schema)
}

/// Parse a schema document held in memory.
pub fn parse(text: &str) -> Result<Schema> {
    let doc = Document::parse(text).map_err(|e| MchgenError::Parse {
        path: "<memory>".into(),
        message: e.to_string(),
    })?;
    let root = doc.root_element();

    let prefix = root
        .attribute("prefix")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| SchemaError::MissingAttribute {
            element: root.tag_name().name().to_string(),
            attribute: "prefix".to_string(),
        })?;

    let events = identifiers(root, "events", "event")?;
    let states = identifiers(root, "states", "state")?;
    let callbacks = identifiers(root, "callbacks", "callback")?;

    let mut fields = Vec::new();
    for (index, node) in grouped(root, "fields", "field").enumerate() {
        fields.push(Field {
            ty: required_attribute(node, "type")?,
            name: identifier(node, index)?,
        });
    }

    let mut field_decls = Vec::new();
    for (index, node) in grouped(root, "fields", "field_decl").enumerate() {
        field_decls.push(FieldDecl {
            ty: required_attribute(node, "type")?,
            name: identifier(node, index)?,
            init: node.attribute("init").map(str::to_string),
        });
    }

    let includes = children(root, "include")
        .map(|node| node.text().unwrap_or_default().to_string())
        .collect();

    let mut initials = children(root, "initial");
    let initial_node = initials.next().ok_or_else(|| SchemaError::MissingElement {
        element: "initial".to_string(),
    })?;
    let initial = identifier(initial_node, 0)?;

    let mut redundant_initials = Vec::new();
    for node in initials {
        let extra = node.text().unwrap_or_default().trim().to_string();
        warn!("Ignoring extra <initial>{extra}</initial>; using '{initial}'");
        redundant_initials.push(extra);
    }

    Ok(Schema {
        prefix: prefix.to_string(),
        events,
        states,
        fields,
        field_decls,
        callbacks,
        includes,
        initial,
        redundant_initials,
    })
}

/// Direct children of `node` with tag `name`, in document order.
fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name(name))
}

/// `./group/item` in document order across every `group` element.
fn grouped<'a, 'input: 'a>(
    root: Node<'a, 'input>,
    group: &'a str,
    item: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    children(root, group).flat_map(move |g| children(g, item))
}

fn identifiers(root: Node<'_, '_>, group: &str, item: &str) -> Result<Vec<String>> {
    grouped(root, group, item)
        .enumerate()
        .map(|(index, node)| identifier(node, index))
        .collect()
}

fn identifier(node: Node<'_, '_>, index: usize) -> Result<String> {
    let text = node.text().unwrap_or_default().trim();
    if text.is_empty() {
        return Err(SchemaError::EmptyElement {
            element: node.tag_name().name().to_string(),
            index,
        }
        .into());
    }
    Ok(text.to_string())
}

fn required_attribute(node: Node<'_, '_>, attribute: &str) -> Result<String> {
    node.attribute(attribute)
        .map(str::to_string)
        .ok_or_else(|| {
            SchemaError::MissingAttribute {
                element: node.tag_name().name().to_string(),
                attribute: attribute.to_string(),
            }
            .into()
        })
}
