//! End-to-end generation tests.
//!
//! Run the full pipeline against the fixture schemas: staged outputs,
//! loading, validation policy, emission, and the atomic commit.

use sled_mchgen::config::GeneratorConfig;
use sled_mchgen::{
    GenerateRequest, MchgenError, SchemaError, emit_implementation, emit_interface, generate,
    loader,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn request(dir: &TempDir, schema: &str, stem: &str) -> GenerateRequest {
    GenerateRequest {
        schema: fixture(schema),
        interface: dir.path().join(format!("{stem}.h")),
        implementation: dir.path().join(format!("{stem}.c")),
    }
}

/// Every public prototype declared in the interface.
fn declared_prototypes(interface: &str) -> Vec<String> {
    interface
        .lines()
        .filter(|line| line.ends_with(");") && !line.starts_with("typedef"))
        .map(|line| line.trim_end_matches(';').to_string())
        .collect()
}

#[test]
fn generates_matched_pair() {
    let dir = TempDir::new().unwrap();
    let req = request(&dir, "mch_net.xml", "mch_net");

    let report = generate(&req, &GeneratorConfig::default()).unwrap();
    assert_eq!(report.prefix, "mch_net");
    assert!(report.issues.is_empty());

    let header = fs::read_to_string(&req.interface).unwrap();
    let source = fs::read_to_string(&req.implementation).unwrap();

    assert!(header.starts_with("// WARNING: Automatically generated file! Do not modify!\n"));
    assert!(header.contains("#ifndef __MCH_NET_H__\n#define __MCH_NET_H__\n"));
    assert!(header.contains(
        "mch_net_t *mch_net_create(intf_t *interface, mch_sdo_t *mch_sdo);"
    ));
    assert!(header.contains("#include \"../interface.h\"\n#include \"mch_sdo.h\"\n"));
    assert!(header.trim_end().ends_with("#endif"));

    assert!(source.contains("#include \"mch_net.h\"\n"));
    assert!(source.contains("\tmachine->state = ST_NET_DISABLED;\n"));
    assert!(source.contains("\tmachine->upload_attempts = 0;\n"));
    assert!(!source.contains("machine->last_heartbeat ="));
}

#[test]
fn every_declared_function_is_defined_with_identical_signature() {
    let schema = loader::load(&fixture("mch_net.xml")).unwrap();
    let header = emit_interface(&schema);
    let source = emit_implementation(&schema);

    let prototypes = declared_prototypes(&header);
    // 7 lifecycle/lookup functions + one setter per callback.
    assert_eq!(prototypes.len(), 7 + schema.callbacks.len());
    for prototype in prototypes {
        assert!(
            source.contains(&format!("{prototype}\n{{\n")),
            "no definition for `{prototype}`"
        );
    }

    for callback in &schema.callbacks {
        let handler_type = format!("mch_net_{callback}_handler_t");
        assert!(header.contains(&format!("typedef void (*{handler_type})")));
        assert!(source.contains(&format!("\t{handler_type} {callback}_handler;\n")));
    }
}

#[test]
fn include_line_follows_interface_file_name() {
    let dir = TempDir::new().unwrap();
    let req = GenerateRequest {
        schema: fixture("start_stop.xml"),
        interface: dir.path().join("fsm_generated.h"),
        implementation: dir.path().join("fsm_generated.c"),
    };
    generate(&req, &GeneratorConfig::default()).unwrap();

    let source = fs::read_to_string(&req.implementation).unwrap();
    assert!(source.contains("#include \"fsm_generated.h\"\n"));
}

#[test]
fn config_disables_trace() {
    let dir = TempDir::new().unwrap();
    let req = request(&dir, "start_stop.xml", "fsm");
    let mut config = GeneratorConfig::default();
    config.apply_overrides(false, true);

    generate(&req, &config).unwrap();
    let source = fs::read_to_string(&req.implementation).unwrap();
    assert!(!source.contains("syslog"));
}

#[test]
fn regeneration_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let req = request(&dir, "mch_net.xml", "mch_net");

    generate(&req, &GeneratorConfig::default()).unwrap();
    let first = (
        fs::read(&req.interface).unwrap(),
        fs::read(&req.implementation).unwrap(),
    );
    generate(&req, &GeneratorConfig::default()).unwrap();
    let second = (
        fs::read(&req.interface).unwrap(),
        fs::read(&req.implementation).unwrap(),
    );
    assert_eq!(first, second);
}

#[test]
fn strict_mode_rejects_unknown_initial_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let req = request(&dir, "unknown_initial.xml", "mch_mp");

    let err = generate(&req, &GeneratorConfig::default()).unwrap_err();
    match err {
        MchgenError::Validation(issues) => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].location, "initial");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(!req.interface.exists());
    assert!(!req.implementation.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn permissive_mode_emits_unknown_initial_verbatim() {
    let dir = TempDir::new().unwrap();
    let req = request(&dir, "unknown_initial.xml", "mch_mp");
    let mut config = GeneratorConfig::default();
    config.apply_overrides(true, false);

    let report = generate(&req, &config).unwrap();
    assert_eq!(report.issues.len(), 1);

    let source = fs::read_to_string(&req.implementation).unwrap();
    assert!(source.contains("\tmachine->state = ST_MP_UNKNOWN;\n"));
}

#[test]
fn missing_prefix_is_reported_not_crashed() {
    let dir = TempDir::new().unwrap();
    let req = request(&dir, "missing_prefix.xml", "fsm");

    let err = generate(&req, &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        MchgenError::Schema(SchemaError::MissingAttribute { ref attribute, .. }) if attribute == "prefix"
    ));
    assert!(!req.interface.exists());
}

#[test]
fn parse_failure_leaves_existing_outputs_untouched() {
    let dir = TempDir::new().unwrap();
    let req = request(&dir, "malformed.xml", "fsm");
    fs::write(&req.interface, "old header").unwrap();
    fs::write(&req.implementation, "old source").unwrap();

    let err = generate(&req, &GeneratorConfig::default()).unwrap_err();
    match err {
        MchgenError::Parse { path, message } => {
            assert_eq!(path, fixture("malformed.xml"));
            assert!(!message.is_empty());
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(&req.interface).unwrap(), "old header");
    assert_eq!(fs::read_to_string(&req.implementation).unwrap(), "old source");
}

#[test]
fn unopenable_output_halts_before_parsing() {
    let dir = TempDir::new().unwrap();
    let req = GenerateRequest {
        // Would be a parse error if the schema were read.
        schema: fixture("malformed.xml"),
        interface: dir.path().join("no_such_dir").join("fsm.h"),
        implementation: dir.path().join("fsm.c"),
    };

    let err = generate(&req, &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, MchgenError::Io { .. }));
}

#[test]
fn missing_schema_is_io_error() {
    let dir = TempDir::new().unwrap();
    let req = request(&dir, "does_not_exist.xml", "fsm");
    let err = generate(&req, &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, MchgenError::Io { ref path, .. } if path == &fixture("does_not_exist.xml")));
}

#[test]
fn aliased_outputs_are_rejected() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let req = GenerateRequest {
        schema: fixture("start_stop.xml"),
        interface: dir.path().join("fsm.h"),
        implementation: dir.path().join("sub").join("..").join("fsm.h"),
    };

    let err = generate(&req, &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, MchgenError::Usage(_)));
    assert!(!req.interface.exists());
}
