//! Edge actions run when a transition commits.

use super::error::ActionError;
use super::state::State;
use super::transition::Transition;
use std::fmt;

/// Type alias for edge action functions.
pub type EdgeAction<S> = Box<dyn Fn(&Transition<S>) -> Result<(), ActionError> + Send + Sync>;

/// Side-effecting procedure executed once each time a matching transition
/// commits.
///
/// Actions may write to hardware, publish telemetry or log, but must never
/// change the state of the machine that runs them. An action that fails
/// aborts the commit; actions that already ran in the same attempt are not
/// undone, so each action must be safe to have run on its own.
///
/// # Example
///
/// ```rust
/// use modeshift::state_enum;
/// use modeshift::{ActionError, Edge, Transition};
///
/// state_enum! {
///     enum Mode {
///         Disabled,
///         Teleop,
///     }
/// }
///
/// let edge = Edge::new(|t: &Transition<Mode>| {
///     if *t.to() == Mode::Teleop {
///         Ok(())
///     } else {
///         Err(ActionError::failed("motors not ready"))
///     }
/// });
///
/// assert!(edge.run(&Transition::new(Mode::Disabled, Mode::Teleop).unwrap()).is_ok());
/// assert!(edge.run(&Transition::new(Mode::Teleop, Mode::Disabled).unwrap()).is_err());
/// ```
pub struct Edge<S: State> {
    action: EdgeAction<S>,
    label: Option<String>,
}

impl<S: State> Edge<S> {
    /// Create an edge from a fallible action.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&Transition<S>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Edge {
            action: Box::new(action),
            label: None,
        }
    }

    /// Create an edge from an action that cannot fail.
    pub fn infallible<F>(action: F) -> Self
    where
        F: Fn(&Transition<S>) + Send + Sync + 'static,
    {
        Self::new(move |t| {
            action(t);
            Ok(())
        })
    }

    /// Attach a label used in logs and in [`TransitionError`](crate::TransitionError).
    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn run(&self, transition: &Transition<S>) -> Result<(), ActionError> {
        (self.action)(transition)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl<S: State> fmt::Debug for Edge<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge").field("label", &self.label).finish()
    }
}
