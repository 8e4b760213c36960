//! Concrete transitions between two distinct states.

use super::state::State;
use serde::Serialize;
use std::fmt;

/// A concrete move from one state to a different state.
///
/// Transitions are immutable values. A transition from a state to itself
/// cannot be constructed, so every `Transition` a guard or edge receives
/// satisfies `from != to`.
///
/// # Example
///
/// ```rust
/// use modeshift::state_enum;
/// use modeshift::Transition;
///
/// state_enum! {
///     enum Mode {
///         Disabled,
///         Teleop,
///     }
/// }
///
/// let transition = Transition::new(Mode::Disabled, Mode::Teleop).unwrap();
/// assert_eq!(transition.from(), &Mode::Disabled);
/// assert_eq!(transition.to(), &Mode::Teleop);
///
/// assert!(Transition::new(Mode::Teleop, Mode::Teleop).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(bound = "")]
pub struct Transition<S: State> {
    from: S,
    to: S,
}

impl<S: State> Transition<S> {
    /// Create a transition, or `None` when `from == to`.
    pub fn new(from: S, to: S) -> Option<Self> {
        if from == to {
            None
        } else {
            Some(Self { from, to })
        }
    }

    /// The state being left.
    pub fn from(&self) -> &S {
        &self.from
    }

    /// The state being entered.
    pub fn to(&self) -> &S {
        &self.to
    }

    /// Split into `(from, to)`.
    pub fn into_parts(self) -> (S, S) {
        (self.from, self.to)
    }
}

impl<S: State> fmt::Display for Transition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from.name(), self.to.name())
    }
}
