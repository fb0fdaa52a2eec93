//! Schema Model: the in-memory form of one machine description.
//!
//! Order is significant everywhere. The position of an event or state in
//! its list is the integer code the generated enum assigns to it, and the
//! field lists fix the storage layout of the generated struct.

use serde::Serialize;

/// A constructor parameter that becomes a struct member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// C type, copied verbatim (e.g. `intf_t *`).
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

/// A struct member that is not a constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDecl {
    /// C type, copied verbatim.
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
    /// Initializer expression assigned in the constructor, copied verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init: Option<String>,
}

/// A parsed machine schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Identifier stem for every generated symbol.
    pub prefix: String,
    pub events: Vec<String>,
    pub states: Vec<String>,
    pub fields: Vec<Field>,
    pub field_decls: Vec<FieldDecl>,
    pub callbacks: Vec<String>,
    /// Raw lines inserted into the interface after the enums.
    pub includes: Vec<String>,
    /// State assigned at construction.
    pub initial: String,
    /// `initial` elements after the first one; ignored by the emitters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub redundant_initials: Vec<String>,
}

impl Schema {
    /// An empty schema with only the required prefix and initial state.
    pub fn new(prefix: impl Into<String>, initial: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            events: Vec::new(),
            states: Vec::new(),
            fields: Vec::new(),
            field_decls: Vec::new(),
            callbacks: Vec::new(),
            includes: Vec::new(),
            initial: initial.into(),
            redundant_initials: Vec::new(),
        }
    }

    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events.extend(events.into_iter().map(Into::into));
        self
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn with_callbacks<I, S>(mut self, callbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.callbacks.extend(callbacks.into_iter().map(Into::into));
        self
    }

    pub fn with_field(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.fields.push(Field {
            ty: ty.into(),
            name: name.into(),
        });
        self
    }

    pub fn with_field_decl(
        mut self,
        ty: impl Into<String>,
        name: impl Into<String>,
        init: Option<&str>,
    ) -> Self {
        self.field_decls.push(FieldDecl {
            ty: ty.into(),
            name: name.into(),
            init: init.map(str::to_string),
        });
        self
    }

    pub fn with_include(mut self, line: impl Into<String>) -> Self {
        self.includes.push(line.into());
        self
    }

    /// Positional code of `name` in the event enum.
    pub fn event_code(&self, name: &str) -> Option<usize> {
        self.events.iter().position(|e| e == name)
    }

    /// Positional code of `name` in the state enum.
    pub fn state_code(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|s| s == name)
    }

    /// Whether `initial` names a declared state.
    pub fn initial_is_declared(&self) -> bool {
        self.state_code(&self.initial).is_some()
    }
}
