//! Dispatch protocol tests for the reference runtime.
//!
//! An instrumented policy records every decision and hook so the order of
//! exit, assignment, and enter can be checked against the generated C.

use sled_mchgen::runtime::{INVALID_EVENT, INVALID_STATE};
use sled_mchgen::{
    EventCode, Machine, SchemaError, StateCode, Transition, TransitionPolicy, loader,
};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Decide(StateCode, EventCode),
    Exit(StateCode),
    Enter(StateCode),
}

/// Start moves Idle to Running, Stop moves Running to Idle, anything else stays.
#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<Call>,
}

const IDLE: StateCode = StateCode(0);
const RUNNING: StateCode = StateCode(1);
const START: EventCode = EventCode(0);
const STOP: EventCode = EventCode(1);

impl TransitionPolicy for Recorder {
    fn decide(&mut self, current: StateCode, event: EventCode) -> StateCode {
        self.calls.push(Call::Decide(current, event));
        match (current, event) {
            (IDLE, START) => RUNNING,
            (RUNNING, STOP) => IDLE,
            (state, _) => state,
        }
    }

    fn on_enter(&mut self, state: StateCode) {
        self.calls.push(Call::Enter(state));
    }

    fn on_exit(&mut self, state: StateCode) {
        self.calls.push(Call::Exit(state));
    }
}

fn start_stop() -> sled_mchgen::Schema {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/start_stop.xml");
    loader::load(&path).unwrap()
}

#[test]
fn starts_in_initial_state() {
    let schema = start_stop();
    let machine = Machine::new(&schema, Recorder::default()).unwrap();

    assert_eq!(machine.active_state(), IDLE);
    assert_eq!(machine.active_state_name(), "Idle");
    assert!(machine.policy().calls.is_empty());
}

#[test]
fn state_change_runs_exit_then_enter() {
    let schema = start_stop();
    let mut machine = Machine::new(&schema, Recorder::default()).unwrap();

    let outcome = machine.handle_event(START);

    assert_eq!(
        outcome,
        Transition::Changed {
            from: IDLE,
            to: RUNNING
        }
    );
    assert_eq!(machine.active_state_name(), "Running");
    assert_eq!(
        machine.policy().calls,
        vec![
            Call::Decide(IDLE, START),
            Call::Exit(IDLE),
            Call::Enter(RUNNING)
        ]
    );
}

#[test]
fn unchanged_state_runs_no_hooks() {
    let schema = start_stop();
    let mut machine = Machine::new(&schema, Recorder::default()).unwrap();

    assert_eq!(machine.handle_event(STOP), Transition::Unchanged(IDLE));
    assert_eq!(machine.active_state(), IDLE);
    assert_eq!(machine.policy().calls, vec![Call::Decide(IDLE, STOP)]);
}

#[test]
fn round_trip_through_both_states() {
    let schema = start_stop();
    let mut machine = Machine::new(&schema, Recorder::default()).unwrap();

    machine.handle_event(START);
    machine.handle_event(START);
    machine.handle_event(STOP);

    let calls = machine.into_policy().calls;
    assert_eq!(
        calls,
        vec![
            Call::Decide(IDLE, START),
            Call::Exit(IDLE),
            Call::Enter(RUNNING),
            Call::Decide(RUNNING, START),
            Call::Decide(RUNNING, STOP),
            Call::Exit(RUNNING),
            Call::Enter(IDLE),
        ]
    );
}

#[test]
fn closure_policy_has_no_hooks() {
    let schema = start_stop();
    let mut machine = Machine::new(&schema, |_: StateCode, _: EventCode| RUNNING).unwrap();

    assert_eq!(
        machine.handle_event(START),
        Transition::Changed {
            from: IDLE,
            to: RUNNING
        }
    );
    assert_eq!(machine.handle_event(STOP), Transition::Unchanged(RUNNING));
}

#[test]
fn name_lookups_fall_back_to_sentinels() {
    let schema = start_stop();
    let machine = Machine::new(&schema, Recorder::default()).unwrap();

    assert_eq!(machine.state_name(RUNNING), "Running");
    assert_eq!(machine.event_name(STOP), "Stop");
    assert_eq!(machine.state_name(StateCode(2)), INVALID_STATE);
    assert_eq!(machine.event_name(EventCode(99)), INVALID_EVENT);

    assert_eq!(machine.state_code("Running"), Some(RUNNING));
    assert_eq!(machine.event_code("Start"), Some(START));
    assert_eq!(machine.event_code("Pause"), None);
}

#[test]
fn undeclared_initial_is_rejected() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/unknown_initial.xml");
    let schema = loader::load(&path).unwrap();

    let err = Machine::new(&schema, Recorder::default()).unwrap_err();
    assert_eq!(
        err,
        SchemaError::UnknownInitial {
            initial: "ST_MP_UNKNOWN".to_string()
        }
    );
}
