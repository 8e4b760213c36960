//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Edge, Guard, State, TransitionPattern};
use crate::machine::{SharedStateMachine, StateMachine};
use crate::registry::{EdgeRegistry, GuardRegistry};

/// Builder for constructing state machines with a fluent API.
///
/// All registration happens here, before the machine goes live.
///
/// # Example
///
/// ```rust
/// use modeshift::builder::StateMachineBuilder;
/// use modeshift::state_enum;
/// use modeshift::{Edge, Guard, TransitionPattern};
///
/// state_enum! {
///     enum Mode {
///         Disabled,
///         EStop,
///         Teleop,
///     }
/// }
///
/// let mut machine = StateMachineBuilder::new()
///     .initial(Mode::Disabled)
///     .name("drivetrain")
///     .guard(TransitionPattern::leaving(Mode::EStop), Guard::deny())
///     .edge(TransitionPattern::entering(Mode::Disabled), Edge::infallible(|_| {}))
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.name(), "drivetrain");
/// assert!(machine.try_change(Mode::Teleop).unwrap());
/// ```
pub struct StateMachineBuilder<S: State> {
    initial: Option<S>,
    name: Option<String>,
    edges: EdgeRegistry<S>,
    guards: GuardRegistry<S>,
}

impl<S: State> StateMachineBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            name: None,
            edges: EdgeRegistry::new(),
            guards: GuardRegistry::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Label the machine's log events.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Register a guard.
    pub fn guard(mut self, pattern: TransitionPattern<S>, guard: Guard<S>) -> Self {
        self.guards.add(pattern, guard);
        self
    }

    /// Register an edge.
    pub fn edge(mut self, pattern: TransitionPattern<S>, edge: Edge<S>) -> Self {
        self.edges.add(pattern, edge);
        self
    }

    /// Replace the guard registry, discarding guards added so far.
    pub fn guards(mut self, guards: GuardRegistry<S>) -> Self {
        self.guards = guards;
        self
    }

    /// Replace the edge registry, discarding edges added so far.
    pub fn edges(mut self, edges: EdgeRegistry<S>) -> Self {
        self.edges = edges;
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StateMachine<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let machine = StateMachine::new(initial, self.edges, self.guards);
        Ok(match self.name {
            Some(name) => machine.named(name),
            None => machine,
        })
    }

    /// Build the machine behind a [`SharedStateMachine`] handle.
    pub fn build_shared(self) -> Result<SharedStateMachine<S>, BuildError> {
        self.build().map(SharedStateMachine::new)
    }
}

impl<S: State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
