//! Symbol naming for generated code.
//!
//! Both emitters derive every type, function, and member name through
//! [`Naming`], and render every function signature through a shared
//! [`Prototype`]. A declaration in the interface and its definition in the
//! implementation are therefore produced by the same code path and cannot
//! drift apart.

use crate::schema::Field;

/// Whether `name` is a valid C identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Join a C type and a name into a declarator.
///
/// Pointer types bind the `*` to the name: `intf_t *` + `interface` gives
/// `intf_t *interface`, `int` + `speed` gives `int speed`.
pub fn declarator(ty: &str, name: &str) -> String {
    let ty = ty.trim();
    if ty.ends_with('*') {
        format!("{ty}{name}")
    } else {
        format!("{ty} {name}")
    }
}

/// Linkage of a generated function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    /// Declared in the interface, defined in the implementation.
    Public,
    /// `static`, visible only inside the implementation translation unit.
    Internal,
}

/// A C function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype {
    pub linkage: Linkage,
    pub ret: String,
    pub name: String,
    pub params: Vec<String>,
}

impl Prototype {
    fn new(linkage: Linkage, ret: impl Into<String>, name: String, params: Vec<String>) -> Self {
        Self {
            linkage,
            ret: ret.into(),
            name,
            params,
        }
    }

    fn param_list(&self) -> String {
        if self.params.is_empty() {
            "void".to_string()
        } else {
            self.params.join(", ")
        }
    }

    /// `ret name(params)`, prefixed with `static` for internal linkage.
    pub fn signature(&self) -> String {
        let head = declarator(&self.ret, &self.name);
        match self.linkage {
            Linkage::Public => format!("{head}({})", self.param_list()),
            Linkage::Internal => format!("static {head}({})", self.param_list()),
        }
    }

    /// The signature terminated as a declaration.
    pub fn declaration(&self) -> String {
        format!("{};", self.signature())
    }

    /// Function pointer declarator named `member` with this signature.
    pub fn pointer(&self, member: &str) -> String {
        format!("{} (*{member})({})", self.ret.trim(), self.param_list())
    }
}

/// Name derivation for one prefix.
#[derive(Debug, Clone, Copy)]
pub struct Naming<'a> {
    prefix: &'a str,
}

impl<'a> Naming<'a> {
    pub fn new(prefix: &'a str) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    fn symbol(&self, suffix: &str) -> String {
        format!("{}_{suffix}", self.prefix)
    }

    // ─── Files and guards ───────────────────────────────────────────

    /// Include guard macro, keyed to the upper-cased prefix.
    pub fn include_guard(&self) -> String {
        format!("__{}_H__", self.prefix.to_uppercase())
    }

    /// Default interface file name included by the implementation.
    pub fn interface_file(&self) -> String {
        format!("{}.h", self.prefix)
    }

    // ─── Types ──────────────────────────────────────────────────────

    pub fn machine_type(&self) -> String {
        self.symbol("t")
    }

    pub fn event_type(&self) -> String {
        self.symbol("event_t")
    }

    pub fn state_type(&self) -> String {
        self.symbol("state_t")
    }

    pub fn policy_type(&self) -> String {
        self.symbol("policy_t")
    }

    pub fn handler_type(&self, callback: &str) -> String {
        self.symbol(&format!("{callback}_handler_t"))
    }

    /// `typedef void (*p_cb_handler_t)(p_t *machine, void *payload);`
    pub fn handler_typedef(&self, callback: &str) -> String {
        format!(
            "typedef void (*{})({} *machine, void *payload);",
            self.handler_type(callback),
            self.machine_type()
        )
    }

    // ─── Struct members ─────────────────────────────────────────────

    pub fn handler_slot(&self, callback: &str) -> String {
        format!("{callback}_handler")
    }

    /// Name of the static policy table bound to the extension points.
    pub fn policy_instance(&self) -> String {
        self.symbol("policy")
    }

    // ─── Public functions ───────────────────────────────────────────

    fn machine_param(&self) -> String {
        format!("{} *machine", self.machine_type())
    }

    pub fn create(&self, fields: &[Field]) -> Prototype {
        Prototype::new(
            Linkage::Public,
            format!("{} *", self.machine_type()),
            self.symbol("create"),
            fields.iter().map(|f| declarator(&f.ty, &f.name)).collect(),
        )
    }

    pub fn destroy(&self) -> Prototype {
        Prototype::new(
            Linkage::Public,
            "void",
            self.symbol("destroy"),
            vec![format!("{} **machine", self.machine_type())],
        )
    }

    pub fn active_state(&self) -> Prototype {
        Prototype::new(
            Linkage::Public,
            self.state_type(),
            self.symbol("active_state"),
            vec![self.machine_param()],
        )
    }

    pub fn handle_event(&self) -> Prototype {
        Prototype::new(
            Linkage::Public,
            "void",
            self.symbol("handle_event"),
            vec![self.machine_param(), format!("{} event", self.event_type())],
        )
    }

    pub fn set_callback_payload(&self) -> Prototype {
        Prototype::new(
            Linkage::Public,
            "void",
            self.symbol("set_callback_payload"),
            vec![self.machine_param(), "void *payload".to_string()],
        )
    }

    pub fn state_name(&self) -> Prototype {
        Prototype::new(
            Linkage::Public,
            "const char *",
            self.symbol("statename"),
            vec![format!("{} state", self.state_type())],
        )
    }

    pub fn event_name(&self) -> Prototype {
        Prototype::new(
            Linkage::Public,
            "const char *",
            self.symbol("eventname"),
            vec![format!("{} event", self.event_type())],
        )
    }

    pub fn set_handler(&self, callback: &str) -> Prototype {
        Prototype::new(
            Linkage::Public,
            "void",
            self.symbol(&format!("set_{callback}_handler")),
            vec![
                self.machine_param(),
                format!("{} handler", self.handler_type(callback)),
            ],
        )
    }

    // ─── Hand-written extension points ──────────────────────────────

    pub fn decide(&self) -> Prototype {
        Prototype::new(
            Linkage::Internal,
            self.state_type(),
            self.symbol("next_state_given_event"),
            vec![self.machine_param(), format!("{} event", self.event_type())],
        )
    }

    pub fn on_enter(&self) -> Prototype {
        Prototype::new(
            Linkage::Internal,
            "void",
            self.symbol("on_enter"),
            vec![self.machine_param()],
        )
    }

    pub fn on_exit(&self) -> Prototype {
        Prototype::new(
            Linkage::Internal,
            "void",
            self.symbol("on_exit"),
            vec![self.machine_param()],
        )
    }
}
