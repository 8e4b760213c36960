//! State machine that gates changes with guards and runs edges on commit.

use crate::core::{Rejection, State, Transition, TransitionError};
use crate::registry::{EdgeRegistry, GuardRegistry};
use std::fmt;
use stillwater::validation::Validation;
use tracing::{debug, trace, warn};

/// Label used in log events when none is configured.
pub const DEFAULT_MACHINE_NAME: &str = "state-machine";

/// Tracks the current operating mode of a controlled system.
///
/// The machine owns its current state and both registries. The state changes
/// only through [`try_change`](Self::try_change), which commits after every
/// matching guard allowed the change and every matching edge ran, or through
/// the [`force_set_state`](Self::force_set_state) escape hatch.
///
/// # Example
///
/// ```rust
/// use modeshift::state_enum;
/// use modeshift::{Guard, GuardRegistry, StateMachine};
///
/// state_enum! {
///     enum Mode {
///         Disabled,
///         EStop,
///         Teleop,
///     }
/// }
///
/// let guards = GuardRegistry::new().state_to_any(Mode::EStop, Guard::deny());
/// let mut machine = StateMachine::with_guards(Mode::Disabled, guards);
///
/// assert!(machine.try_change(Mode::EStop).unwrap());
/// assert!(!machine.try_change(Mode::Teleop).unwrap());
/// assert_eq!(machine.current_state(), &Mode::EStop);
/// ```
pub struct StateMachine<S: State> {
    name: String,
    current: S,
    edges: EdgeRegistry<S>,
    guards: GuardRegistry<S>,
}

impl<S: State> StateMachine<S> {
    /// Create a machine in `initial`.
    ///
    /// Registries are not validated against the initial state: a pattern may
    /// name states that are never reached.
    pub fn new(initial: S, edges: EdgeRegistry<S>, guards: GuardRegistry<S>) -> Self {
        Self {
            name: DEFAULT_MACHINE_NAME.to_string(),
            current: initial,
            edges,
            guards,
        }
    }

    /// Like [`new`](Self::new) with no guards.
    pub fn with_edges(initial: S, edges: EdgeRegistry<S>) -> Self {
        Self::new(initial, edges, GuardRegistry::empty())
    }

    /// Like [`new`](Self::new) with no edges.
    pub fn with_guards(initial: S, guards: GuardRegistry<S>) -> Self {
        Self::new(initial, EdgeRegistry::empty(), guards)
    }

    /// Set the label attached to this machine's log events.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        &self.current
    }

    pub fn edges(&self) -> &EdgeRegistry<S> {
        &self.edges
    }

    pub fn guards(&self) -> &GuardRegistry<S> {
        &self.guards
    }

    /// Check whether the machine may change to `to` right now.
    ///
    /// Always false for the current state; no guard is consulted in that
    /// case.
    pub fn can_change(&self, to: &S) -> bool {
        match Transition::new(self.current.clone(), to.clone()) {
            Some(transition) => self.guards.evaluate(&transition),
            None => false,
        }
    }

    /// Every reason a change to `to` is currently blocked.
    ///
    /// `Success` exactly when [`can_change`](Self::can_change) is true.
    /// Every matching guard is evaluated, not only up to the first rejection.
    pub fn explain(&self, to: &S) -> Validation<(), Vec<Rejection<S>>> {
        let rejections = match Transition::new(self.current.clone(), to.clone()) {
            Some(transition) => self.guards.rejections(&transition),
            None => vec![Rejection::SelfTransition { state: to.clone() }],
        };

        if rejections.is_empty() {
            Validation::Success(())
        } else {
            Validation::Failure(rejections)
        }
    }

    /// Attempt to change to `to`.
    ///
    /// Returns `Ok(false)` with no side effects if the change is a
    /// self-transition or a matching guard rejects it. Otherwise runs every
    /// matching edge in tier order and commits, returning `Ok(true)`.
    ///
    /// If an edge fails the error is returned at once and the current state
    /// is left unchanged. Edges that already ran are not undone.
    pub fn try_change(&mut self, to: S) -> Result<bool, TransitionError> {
        let Some(transition) = Transition::new(self.current.clone(), to) else {
            trace!(
                machine = %self.name,
                state = self.current.name(),
                "Rejected self-transition"
            );
            return Ok(false);
        };

        if !self.guards.evaluate(&transition) {
            trace!(
                machine = %self.name,
                from = transition.from().name(),
                to = transition.to().name(),
                "Guard rejected transition"
            );
            return Ok(false);
        }

        let actions = self.edges.actions_for(&transition);
        let edge_count = actions.len();

        for (index, (tier, edge)) in actions.into_iter().enumerate() {
            if let Err(source) = edge.run(&transition) {
                let edge_name = edge
                    .label()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{index}"));

                warn!(
                    machine = %self.name,
                    from = transition.from().name(),
                    to = transition.to().name(),
                    edge = %edge_name,
                    tier = ?tier,
                    error = %source,
                    "Edge failed, transition not committed"
                );

                return Err(TransitionError::ActionFailed {
                    from: transition.from().name().to_string(),
                    to: transition.to().name().to_string(),
                    edge: edge_name,
                    source,
                });
            }
        }

        debug!(
            machine = %self.name,
            from = transition.from().name(),
            to = transition.to().name(),
            edges = edge_count,
            "Committed transition"
        );

        let (_, to) = transition.into_parts();
        self.current = to;
        Ok(true)
    }

    /// Overwrite the current state without consulting guards or running
    /// edges.
    ///
    /// Meant for initialization, recovery and test setup, not steady-state
    /// operation.
    pub fn force_set_state(&mut self, to: S) {
        warn!(
            machine = %self.name,
            from = self.current.name(),
            to = to.name(),
            "Forcing state, guards and edges bypassed"
        );
        self.current = to;
    }
}

impl<S: State> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("current", &self.current)
            .field("edges", &self.edges.len())
            .field("guards", &self.guards.len())
            .finish()
    }
}
