//! Reference runtime for the generated dispatch protocol.
//!
//! [`Machine`] executes a [`Schema`] exactly the way the emitted
//! `handle_event` does: ask the [`TransitionPolicy`] for the next state, do
//! nothing if it equals the current one, otherwise exit hook, assignment,
//! debug trace, enter hook. It lets hand-written transition logic be
//! exercised from Rust and pins the protocol down in tests.
//!
//! Like the generated C object, a `Machine` has no internal locking. It is
//! `Send` when the policy is, and `&mut self` on [`Machine::handle_event`]
//! serializes dispatch.

use crate::error::SchemaError;
use crate::schema::Schema;
use tracing::{debug, warn};

/// Name returned for a state code outside the declared set.
pub const INVALID_STATE: &str = "Invalid state";
/// Name returned for an event code outside the declared set.
pub const INVALID_EVENT: &str = "Invalid event";

/// Positional state code, equal to the generated enumerator value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateCode(pub usize);

/// Positional event code, equal to the generated enumerator value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventCode(pub usize);

/// Hand-written transition logic for one machine.
///
/// `decide` maps the current state and an event to the next state.
/// `on_exit` runs while the machine still holds the old state and
/// `on_enter` runs after the new state is assigned; each receives the state
/// the machine holds at that moment.
pub trait TransitionPolicy {
    fn decide(&mut self, current: StateCode, event: EventCode) -> StateCode;

    fn on_enter(&mut self, _state: StateCode) {}

    fn on_exit(&mut self, _state: StateCode) {}
}

/// A plain decision closure is a policy without hooks.
impl<F> TransitionPolicy for F
where
    F: FnMut(StateCode, EventCode) -> StateCode,
{
    fn decide(&mut self, current: StateCode, event: EventCode) -> StateCode {
        self(current, event)
    }
}

/// Outcome of one [`Machine::handle_event`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Decision returned the current state; no hook ran.
    Unchanged(StateCode),
    /// State changed; both hooks ran.
    Changed { from: StateCode, to: StateCode },
}

/// A running instance of a schema-described machine.
#[derive(Debug)]
pub struct Machine<'s, P> {
    schema: &'s Schema,
    state: StateCode,
    policy: P,
}

impl<'s, P: TransitionPolicy> Machine<'s, P> {
    /// Construct in the schema's initial state.
    pub fn new(schema: &'s Schema, policy: P) -> Result<Self, SchemaError> {
        let initial = schema
            .state_code(&schema.initial)
            .ok_or_else(|| SchemaError::UnknownInitial {
                initial: schema.initial.clone(),
            })?;

        Ok(Self {
            schema,
            state: StateCode(initial),
            policy,
        })
    }

    pub fn active_state(&self) -> StateCode {
        self.state
    }

    pub fn active_state_name(&self) -> &'s str {
        self.state_name(self.state)
    }

    /// Declared name of `code`, or [`INVALID_STATE`].
    pub fn state_name(&self, code: StateCode) -> &'s str {
        self.schema
            .states
            .get(code.0)
            .map(String::as_str)
            .unwrap_or(INVALID_STATE)
    }

    /// Declared name of `code`, or [`INVALID_EVENT`].
    pub fn event_name(&self, code: EventCode) -> &'s str {
        self.schema
            .events
            .get(code.0)
            .map(String::as_str)
            .unwrap_or(INVALID_EVENT)
    }

    pub fn state_code(&self, name: &str) -> Option<StateCode> {
        self.schema.state_code(name).map(StateCode)
    }

    pub fn event_code(&self, name: &str) -> Option<EventCode> {
        self.schema.event_code(name).map(EventCode)
    }

    /// Dispatch one event.
    pub fn handle_event(&mut self, event: EventCode) -> Transition {
        let next = self.policy.decide(self.state, event);
        if next == self.state {
            return Transition::Unchanged(next);
        }

        let from = self.state;
        self.policy.on_exit(from);
        self.state = next;
        if next.0 >= self.schema.states.len() {
            warn!(
                "{}: decision for {} returned undeclared state code {}",
                self.schema.prefix,
                self.event_name(event),
                next.0
            );
        }
        debug!(
            "{}_handle_event() state changed to {}",
            self.schema.prefix,
            self.state_name(next)
        );
        self.policy.on_enter(next);

        Transition::Changed { from, to: next }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    pub fn into_policy(self) -> P {
        self.policy
    }
}
