//! State machine runtime
//!
//! Flat state machines for widget interaction states. A machine is a table of
//! `(from, event) -> to` transitions; events with no matching row are ignored.

use rustc_hash::FxHashMap;

use crate::events::EventType;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventType,
    pub to_state: StateId,
}

impl Transition {
    pub fn new(from: StateId, event: EventType, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Builder for creating state machines
#[derive(Debug)]
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: Vec<Transition>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
        }
    }

    /// Add a transition (from, event, to)
    pub fn on(mut self, from: StateId, event: EventType, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    pub fn build(self) -> StateMachine {
        let mut table = FxHashMap::default();
        for t in &self.transitions {
            // First registration wins, matching declaration order
            table.entry((t.from_state, t.event)).or_insert(t.to_state);
        }
        StateMachine {
            current_state: self.initial_state,
            table,
            history: Vec::new(),
        }
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine {
    current_state: StateId,
    table: FxHashMap<(StateId, EventType), StateId>,
    /// History of state transitions (for debugging)
    history: Vec<(StateId, EventType, StateId)>,
}

impl StateMachine {
    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    pub fn history(&self) -> &[(StateId, EventType, StateId)] {
        &self.history
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.table.contains_key(&(self.current_state, event))
    }

    /// Send an event, returning the (possibly unchanged) current state
    pub fn send(&mut self, event: EventType) -> StateId {
        let current = self.current_state;
        let Some(&to_state) = self.table.get(&(current, event)) else {
            return current;
        };

        self.current_state = to_state;
        self.history.push((current, event, to_state));
        tracing::trace!(from = current, event, to = to_state, "fsm transition");

        to_state
    }
}
