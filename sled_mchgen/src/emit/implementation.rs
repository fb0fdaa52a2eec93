//! Implementation module emitter.
//!
//! The transition decision and the enter/exit hooks are only declared here.
//! Their bodies are written by hand in the same translation unit; the
//! generated `handle_event` reaches them through a static policy table so
//! the compiler checks each hook against the expected signature.

use super::{CodeWriter, EmitOptions, GENERATED_WARNING};
use crate::naming::{Naming, declarator};
use crate::schema::Schema;

/// Produce the implementation text with default options.
pub fn emit_implementation(schema: &Schema) -> String {
    emit_implementation_with(schema, &EmitOptions::default())
}

/// Produce the implementation text for `schema`.
pub fn emit_implementation_with(schema: &Schema, options: &EmitOptions) -> String {
    let naming = Naming::new(&schema.prefix);
    let mut w = CodeWriter::default();

    emit_preamble(&mut w, &naming, options);
    emit_struct(&mut w, &naming, schema);
    emit_policy(&mut w, &naming);
    emit_create(&mut w, &naming, schema);
    emit_destroy(&mut w, &naming);
    emit_accessors(&mut w, &naming, schema);
    emit_name_lookup(&mut w, &naming, schema);
    emit_handle_event(&mut w, &naming, options);

    w.finish()
}

fn emit_preamble(w: &mut CodeWriter, naming: &Naming<'_>, options: &EmitOptions) {
    let interface = options
        .interface_include
        .clone()
        .unwrap_or_else(|| naming.interface_file());

    w.line(GENERATED_WARNING);
    w.line(format!("#include \"{interface}\""));
    w.line("#include <assert.h>");
    w.line("#include <stdlib.h>");
    if options.debug_trace {
        w.line("#include <syslog.h>");
    }
    w.blank();
}

/// Layout: state, payload, callback slots, constructor fields, internal fields.
fn emit_struct(w: &mut CodeWriter, naming: &Naming<'_>, schema: &Schema) {
    w.line(format!("struct {} {{", naming.machine_type()));
    w.indented(1, format!("{} state;", naming.state_type()));
    w.indented(1, "void *payload;");

    if !schema.callbacks.is_empty() {
        w.blank();
        for callback in &schema.callbacks {
            w.indented(
                1,
                format!(
                    "{} {};",
                    naming.handler_type(callback),
                    naming.handler_slot(callback)
                ),
            );
        }
    }

    if !schema.fields.is_empty() || !schema.field_decls.is_empty() {
        w.blank();
        for field in &schema.fields {
            w.indented(1, format!("{};", declarator(&field.ty, &field.name)));
        }
        for decl in &schema.field_decls {
            w.indented(1, format!("{};", declarator(&decl.ty, &decl.name)));
        }
    }

    w.line("};");
    w.blank();
}

fn emit_policy(w: &mut CodeWriter, naming: &Naming<'_>) {
    let decide = naming.decide();
    let on_enter = naming.on_enter();
    let on_exit = naming.on_exit();

    w.line(decide.declaration());
    w.line(on_enter.declaration());
    w.line(on_exit.declaration());
    w.blank();

    w.line(format!("static const struct {} {{", naming.policy_type()));
    w.indented(1, format!("{};", decide.pointer("decide")));
    w.indented(1, format!("{};", on_enter.pointer("on_enter")));
    w.indented(1, format!("{};", on_exit.pointer("on_exit")));
    w.line(format!("}} {} = {{", naming.policy_instance()));
    w.indented(1, format!("{},", decide.name));
    w.indented(1, format!("{},", on_enter.name));
    w.indented(1, format!("{},", on_exit.name));
    w.line("};");
    w.blank();
}

fn emit_create(w: &mut CodeWriter, naming: &Naming<'_>, schema: &Schema) {
    let machine = naming.machine_type();

    w.line(naming.create(&schema.fields).signature());
    w.line("{");
    w.indented(
        1,
        format!("{machine} *machine = ({machine} *)calloc(1, sizeof({machine}));"),
    );
    w.indented(1, "if(!machine)");
    w.indented(2, "return NULL;");
    w.blank();
    w.indented(1, format!("machine->state = {};", schema.initial));
    w.indented(1, "machine->payload = NULL;");

    if !schema.fields.is_empty() {
        w.blank();
        for field in &schema.fields {
            w.indented(1, format!("machine->{0} = {0};", field.name));
        }
    }

    let initialized: Vec<_> = schema
        .field_decls
        .iter()
        .filter_map(|decl| decl.init.as_ref().map(|init| (&decl.name, init)))
        .collect();
    if !initialized.is_empty() {
        w.blank();
        for (name, init) in initialized {
            w.indented(1, format!("machine->{name} = {init};"));
        }
    }

    if !schema.callbacks.is_empty() {
        w.blank();
        for callback in &schema.callbacks {
            w.indented(1, format!("machine->{} = NULL;", naming.handler_slot(callback)));
        }
    }

    w.blank();
    w.indented(1, "return machine;");
    w.line("}");
    w.blank();
}

fn emit_destroy(w: &mut CodeWriter, naming: &Naming<'_>) {
    w.line(naming.destroy().signature());
    w.line("{");
    w.indented(1, "assert(machine);");
    w.indented(1, "free(*machine);");
    w.indented(1, "*machine = NULL;");
    w.line("}");
    w.blank();
}

fn emit_accessors(w: &mut CodeWriter, naming: &Naming<'_>, schema: &Schema) {
    w.line(naming.active_state().signature());
    w.line("{");
    w.indented(1, "assert(machine);");
    w.indented(1, "return machine->state;");
    w.line("}");
    w.blank();

    w.line(naming.set_callback_payload().signature());
    w.line("{");
    w.indented(1, "assert(machine);");
    w.indented(1, "machine->payload = payload;");
    w.line("}");
    w.blank();

    for callback in &schema.callbacks {
        w.line(naming.set_handler(callback).signature());
        w.line("{");
        w.indented(1, "assert(machine);");
        w.indented(1, format!("machine->{} = handler;", naming.handler_slot(callback)));
        w.line("}");
        w.blank();
    }
}

fn emit_name_lookup(w: &mut CodeWriter, naming: &Naming<'_>, schema: &Schema) {
    emit_switch(
        w,
        &naming.state_name().signature(),
        "state",
        &schema.states,
        "Invalid state",
    );
    emit_switch(
        w,
        &naming.event_name().signature(),
        "event",
        &schema.events,
        "Invalid event",
    );
}

/// Exhaustive case dispatch with a fixed fallback for unknown codes.
fn emit_switch(w: &mut CodeWriter, signature: &str, var: &str, tags: &[String], fallback: &str) {
    w.line(signature);
    w.line("{");
    w.indented(1, format!("switch({var}) {{"));
    for tag in tags {
        w.indented(2, format!("case {tag}: return \"{tag}\";"));
    }
    w.indented(1, "}");
    w.indented(1, format!("return \"{fallback}\";"));
    w.line("}");
    w.blank();
}

/// Exit hook, state assignment, trace, enter hook; nothing when the
/// decision keeps the current state.
fn emit_handle_event(w: &mut CodeWriter, naming: &Naming<'_>, options: &EmitOptions) {
    let policy = naming.policy_instance();

    w.line(naming.handle_event().signature());
    w.line("{");
    w.indented(1, "assert(machine);");
    w.indented(
        1,
        format!(
            "{} next_state = {policy}.decide(machine, event);",
            naming.state_type()
        ),
    );
    w.indented(1, "if(machine->state == next_state)");
    w.indented(2, "return;");
    w.blank();
    w.indented(1, format!("{policy}.on_exit(machine);"));
    w.indented(1, "machine->state = next_state;");
    if options.debug_trace {
        w.indented(
            1,
            format!(
                "syslog(LOG_DEBUG, \"%s() state changed to %s\", __func__, {}(machine->state));",
                naming.state_name().name
            ),
        );
    }
    w.indented(1, format!("{policy}.on_enter(machine);"));
    w.line("}");
}
