//! Edge registry: pattern-keyed actions run on commit.

use super::table::PatternTable;
use crate::core::{Edge, State, Tier, Transition, TransitionPattern};
use std::collections::HashSet;
use tracing::trace;

/// Collection of every registered [`Edge`], keyed by [`TransitionPattern`].
///
/// [`actions_for`](Self::actions_for) returns matching edges in a fixed
/// order: exact `(from, to)` matches, then `(from, *)`, then `(*, to)`, then
/// `(*, *)`, each tier in registration order. Hardware commands issued by
/// edges therefore happen in the same order on every run.
///
/// # Example
///
/// ```rust
/// use modeshift::state_enum;
/// use modeshift::{Edge, EdgeRegistry, Transition};
///
/// state_enum! {
///     enum Mode {
///         Disabled,
///         Teleop,
///     }
/// }
///
/// let edges = EdgeRegistry::new()
///     .any_to_any(Edge::infallible(|_| {}).named("log"))
///     .state_to_any(Mode::Disabled, Edge::infallible(|_| {}).named("enable motors"));
///
/// let labels: Vec<_> = edges
///     .actions_for(&Transition::new(Mode::Disabled, Mode::Teleop).unwrap())
///     .into_iter()
///     .map(|(_, edge)| edge.label())
///     .collect();
///
/// assert_eq!(labels, vec![Some("enable motors"), Some("log")]);
/// ```
pub struct EdgeRegistry<S: State> {
    table: PatternTable<S, Edge<S>>,
}

impl<S: State> EdgeRegistry<S> {
    pub fn new() -> Self {
        Self {
            table: PatternTable::new(),
        }
    }

    /// A registry with no edges; commits run nothing.
    pub fn empty() -> Self {
        Self::new()
    }

    /// Register `edge` for every transition matching `pattern`.
    pub fn register(mut self, pattern: TransitionPattern<S>, edge: Edge<S>) -> Self {
        self.add(pattern, edge);
        self
    }

    /// Non-consuming form of [`register`](Self::register).
    pub fn add(&mut self, pattern: TransitionPattern<S>, edge: Edge<S>) -> &mut Self {
        let rendered = pattern.to_string();
        let label = edge.label().map(str::to_string);
        let keys = self.table.insert(pattern, edge);
        trace!(pattern = %rendered, edge = ?label, keys, "Registered edge");
        self
    }

    /// `(from, to)`
    pub fn state_to_state(self, from: S, to: S, edge: Edge<S>) -> Self {
        self.register(TransitionPattern::exact(from, to), edge)
    }

    /// Every pairing of `from` and `to`.
    pub fn states_to_states(self, from: HashSet<S>, to: HashSet<S>, edge: Edge<S>) -> Self {
        self.register(TransitionPattern::new(from, to), edge)
    }

    /// `(from, *)`
    pub fn state_to_any(self, from: S, edge: Edge<S>) -> Self {
        self.register(TransitionPattern::leaving(from), edge)
    }

    /// `(*, to)`
    pub fn any_to_state(self, to: S, edge: Edge<S>) -> Self {
        self.register(TransitionPattern::entering(to), edge)
    }

    pub fn state_to_states(self, from: S, to: HashSet<S>, edge: Edge<S>) -> Self {
        self.register(TransitionPattern::new([from], to), edge)
    }

    pub fn states_to_state(self, from: HashSet<S>, to: S, edge: Edge<S>) -> Self {
        self.register(TransitionPattern::new(from, [to]), edge)
    }

    /// `(*, *)`
    pub fn any_to_any(self, edge: Edge<S>) -> Self {
        self.register(TransitionPattern::any(), edge)
    }

    /// Matching edges in execution order.
    pub fn actions_for(&self, transition: &Transition<S>) -> Vec<(Tier, &Edge<S>)> {
        self.table.matching(transition)
    }

    /// Registered patterns in registration order.
    pub fn patterns(&self) -> &[TransitionPattern<S>] {
        self.table.patterns()
    }

    /// Number of registrations (not expanded keys).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: State> Default for EdgeRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Down,
        Level,
        Up,
        Stowed,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Down => "Down",
                Self::Level => "Level",
                Self::Up => "Up",
                Self::Stowed => "Stowed",
            }
        }
    }

    use TestState::*;

    fn t(from: TestState, to: TestState) -> Transition<TestState> {
        Transition::new(from, to).unwrap()
    }

    fn labels(edges: &EdgeRegistry<TestState>, transition: &Transition<TestState>) -> Vec<String> {
        edges
            .actions_for(transition)
            .into_iter()
            .map(|(_, edge)| edge.label().unwrap_or("?").to_string())
            .collect()
    }

    fn noop(label: &str) -> Edge<TestState> {
        Edge::infallible(|_| {}).named(label)
    }

    #[test]
    fn exact_runs_before_leaving_wildcard() {
        let edges = EdgeRegistry::new()
            .state_to_any(Down, noop("leaving down"))
            .state_to_state(Down, Up, noop("down to up"));

        assert_eq!(labels(&edges, &t(Down, Up)), vec!["down to up", "leaving down"]);
        assert_eq!(labels(&edges, &t(Down, Level)), vec!["leaving down"]);
    }

    #[test]
    fn tiers_run_in_fixed_order_regardless_of_registration() {
        let edges = EdgeRegistry::new()
            .any_to_any(noop("any"))
            .any_to_state(Up, noop("entering up"))
            .state_to_any(Level, noop("leaving level"))
            .state_to_state(Level, Up, noop("exact"));

        assert_eq!(
            labels(&edges, &t(Level, Up)),
            vec!["exact", "leaving level", "entering up", "any"]
        );
    }

    #[test]
    fn registration_order_is_kept_within_a_tier() {
        let edges = EdgeRegistry::new()
            .any_to_state(Up, noop("first"))
            .any_to_state(Stowed, noop("elsewhere"))
            .any_to_state(Up, noop("second"))
            .states_to_state(HashSet::from([Down, Level]), Up, noop("exact-ish"))
            .any_to_state(Up, noop("third"));

        assert_eq!(
            labels(&edges, &t(Down, Up)),
            vec!["exact-ish", "first", "second", "third"]
        );
    }

    #[test]
    fn non_matching_transitions_get_no_actions() {
        let edges = EdgeRegistry::new()
            .state_to_states(Down, HashSet::from([Up, Level]), noop("from down"))
            .states_to_states(HashSet::from([Up]), HashSet::from([Stowed]), noop("stow"));

        assert!(edges.actions_for(&t(Level, Down)).is_empty());
        assert_eq!(labels(&edges, &t(Up, Stowed)), vec!["stow"]);
        assert_eq!(labels(&edges, &t(Down, Level)), vec!["from down"]);
    }

    #[test]
    fn actions_receive_the_transition() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let edges = EdgeRegistry::new().any_to_state(
            Stowed,
            Edge::infallible(move |t: &Transition<TestState>| {
                sink.lock().unwrap().push(t.from().clone());
            }),
        );

        for (_, edge) in edges.actions_for(&t(Level, Stowed)) {
            edge.run(&t(Level, Stowed)).unwrap();
        }

        assert_eq!(*seen.lock().unwrap(), vec![Level]);
    }

    #[test]
    fn empty_registry_has_no_patterns() {
        let edges = EdgeRegistry::<TestState>::empty();
        assert!(edges.is_empty());
        assert!(edges.patterns().is_empty());
    }
}
