//! Guard predicates for gating state transitions.
//!
//! Guards are pure boolean functions over a concrete [`Transition`]. They
//! decide whether a change is currently permitted and must never have side
//! effects, least of all on the machine they gate.

use super::state::State;
use super::transition::Transition;
use std::fmt;

/// Pure predicate that determines if a transition may be committed.
///
/// # Example
///
/// ```rust
/// use modeshift::state_enum;
/// use modeshift::{Guard, Transition};
///
/// state_enum! {
///     enum Mode {
///         Disabled,
///         Auto,
///         Teleop,
///     }
/// }
///
/// // Only allow entering Auto from Disabled
/// let guard = Guard::named("auto from disabled", |t: &Transition<Mode>| {
///     *t.to() != Mode::Auto || *t.from() == Mode::Disabled
/// });
///
/// assert!(guard.check(&Transition::new(Mode::Disabled, Mode::Auto).unwrap()));
/// assert!(!guard.check(&Transition::new(Mode::Teleop, Mode::Auto).unwrap()));
/// assert_eq!(guard.label(), Some("auto from disabled"));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&Transition<S>) -> bool + Send + Sync>,
    label: Option<String>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be pure (deterministic, no side effects) and
    /// thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Transition<S>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            label: None,
        }
    }

    /// Create a guard carrying a label for rejection reports and logs.
    pub fn named<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Transition<S>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            label: Some(label.into()),
        }
    }

    /// A guard that rejects every transition it is registered for.
    ///
    /// Registered on `(state, *)` this makes `state` absorbing.
    pub fn deny() -> Self {
        Self::new(|_| false)
    }

    /// Check if the guard allows this transition.
    pub fn check(&self, transition: &Transition<S>) -> bool {
        (self.predicate)(transition)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("label", &self.label).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Down,
        Level,
        Up,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Down => "Down",
                Self::Level => "Level",
                Self::Up => "Up",
            }
        }
    }

    fn t(from: TestState, to: TestState) -> Transition<TestState> {
        Transition::new(from, to).unwrap()
    }

    #[test]
    fn guard_sees_both_endpoints() {
        let guard = Guard::new(|t: &Transition<TestState>| {
            !(*t.from() == TestState::Down && *t.to() == TestState::Up)
        });

        assert!(guard.check(&t(TestState::Down, TestState::Level)));
        assert!(guard.check(&t(TestState::Level, TestState::Up)));
        assert!(!guard.check(&t(TestState::Down, TestState::Up)));
    }

    #[test]
    fn deny_rejects_everything() {
        let guard = Guard::<TestState>::deny();

        assert!(!guard.check(&t(TestState::Down, TestState::Up)));
        assert!(!guard.check(&t(TestState::Up, TestState::Level)));
        assert_eq!(guard.label(), None);
    }

    #[test]
    fn guard_is_deterministic() {
        let transition = t(TestState::Level, TestState::Up);
        let guard = Guard::new(|t: &Transition<TestState>| *t.to() == TestState::Up);

        assert_eq!(guard.check(&transition), guard.check(&transition));
    }

    #[test]
    fn named_guard_reports_label() {
        let guard = Guard::<TestState>::named("wrist horizontal", |_| true);

        assert_eq!(guard.label(), Some("wrist horizontal"));
        assert!(format!("{guard:?}").contains("wrist horizontal"));
    }
}
