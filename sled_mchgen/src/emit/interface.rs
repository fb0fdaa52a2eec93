//! Interface module emitter.

use super::{CodeWriter, GENERATED_WARNING};
use crate::naming::Naming;
use crate::schema::Schema;

/// Produce the public interface text for `schema`.
///
/// Section order is fixed: warning and guard, opaque handle, event enum,
/// state enum, verbatim includes, lifecycle and lookup prototypes, one
/// typedef + setter pair per callback, guard close.
pub fn emit_interface(schema: &Schema) -> String {
    let naming = Naming::new(&schema.prefix);
    let mut w = CodeWriter::default();

    w.line(GENERATED_WARNING);
    w.line(format!("#ifndef {}", naming.include_guard()));
    w.line(format!("#define {}", naming.include_guard()));
    w.blank();

    let machine = naming.machine_type();
    w.line(format!("typedef struct {machine} {machine};"));
    w.blank();

    emit_enum(&mut w, &naming.event_type(), &schema.events);
    emit_enum(&mut w, &naming.state_type(), &schema.states);

    if !schema.includes.is_empty() {
        for include in &schema.includes {
            w.line(include);
        }
        w.blank();
    }

    for prototype in [
        naming.create(&schema.fields),
        naming.destroy(),
        naming.active_state(),
        naming.handle_event(),
        naming.set_callback_payload(),
        naming.state_name(),
        naming.event_name(),
    ] {
        w.line(prototype.declaration());
    }
    w.blank();

    for callback in &schema.callbacks {
        w.line(naming.handler_typedef(callback));
        w.line(naming.set_handler(callback).declaration());
        w.blank();
    }

    w.line("#endif");
    w.finish()
}

/// Enumerators keep declaration order; the position is the integer code.
fn emit_enum(w: &mut CodeWriter, name: &str, tags: &[String]) {
    w.line(format!("typedef enum {name} {{"));
    for tag in tags {
        w.indented(1, format!("{tag},"));
    }
    w.line(format!("}} {name};"));
    w.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intf() -> Schema {
        Schema::new("mch_intf", "ST_INTF_CLOSED")
            .with_events(["EV_INTF_OPEN", "EV_INTF_CLOSE"])
            .with_states(["ST_INTF_CLOSED", "ST_INTF_OPENED"])
            .with_field("intf_t *", "interface")
            .with_callbacks(["opened", "closed"])
            .with_include("#include \"../interface.h\"")
    }

    #[test]
    fn full_output() {
        let expected = "\
// WARNING: Automatically generated file! Do not modify!
#ifndef __MCH_INTF_H__
#define __MCH_INTF_H__

typedef struct mch_intf_t mch_intf_t;

typedef enum mch_intf_event_t {
\tEV_INTF_OPEN,
\tEV_INTF_CLOSE,
} mch_intf_event_t;

typedef enum mch_intf_state_t {
\tST_INTF_CLOSED,
\tST_INTF_OPENED,
} mch_intf_state_t;

#include \"../interface.h\"

mch_intf_t *mch_intf_create(intf_t *interface);
void mch_intf_destroy(mch_intf_t **machine);
mch_intf_state_t mch_intf_active_state(mch_intf_t *machine);
void mch_intf_handle_event(mch_intf_t *machine, mch_intf_event_t event);
void mch_intf_set_callback_payload(mch_intf_t *machine, void *payload);
const char *mch_intf_statename(mch_intf_state_t state);
const char *mch_intf_eventname(mch_intf_event_t event);

typedef void (*mch_intf_opened_handler_t)(mch_intf_t *machine, void *payload);
void mch_intf_set_opened_handler(mch_intf_t *machine, mch_intf_opened_handler_t handler);

typedef void (*mch_intf_closed_handler_t)(mch_intf_t *machine, void *payload);
void mch_intf_set_closed_handler(mch_intf_t *machine, mch_intf_closed_handler_t handler);

#endif
";
        assert_eq!(emit_interface(&intf()), expected);
    }

    #[test]
    fn no_fields_means_void_create() {
        let schema = Schema::new("fsm", "Idle")
            .with_events(["Start"])
            .with_states(["Idle"]);
        let text = emit_interface(&schema);
        assert!(text.contains("fsm_t *fsm_create(void);\n"));
        assert!(!text.contains("handler_t"));
    }

    #[test]
    fn enum_order_follows_schema() {
        let schema = Schema::new("fsm", "B")
            .with_events(["E2", "E1"])
            .with_states(["B", "A"]);
        let text = emit_interface(&schema);
        let e2 = text.find("\tE2,").unwrap();
        let e1 = text.find("\tE1,").unwrap();
        assert!(e2 < e1);
        assert!(text.find("\tB,").unwrap() < text.find("\tA,").unwrap());
    }
}
