//! Guard registry: pattern-keyed permission predicates.

use super::table::PatternTable;
use crate::core::{Guard, Rejection, State, Tier, Transition, TransitionPattern};
use std::collections::HashSet;
use tracing::trace;

/// Collection of every registered [`Guard`], keyed by [`TransitionPattern`].
///
/// A transition is permitted iff every guard whose pattern matches it
/// returns true; with no matching guard it is permitted. Registration is
/// fluent and happens before the owning machine goes live.
///
/// # Example
///
/// ```rust
/// use modeshift::state_enum;
/// use modeshift::{Guard, GuardRegistry, Transition};
///
/// state_enum! {
///     enum Mode {
///         Disabled,
///         EStop,
///         Teleop,
///     }
/// }
///
/// let guards = GuardRegistry::new()
///     .state_to_any(Mode::EStop, Guard::named("cannot leave e-stop", |_| false));
///
/// assert!(!guards.evaluate(&Transition::new(Mode::EStop, Mode::Teleop).unwrap()));
/// assert!(guards.evaluate(&Transition::new(Mode::Disabled, Mode::Teleop).unwrap()));
/// ```
pub struct GuardRegistry<S: State> {
    table: PatternTable<S, Guard<S>>,
}

impl<S: State> GuardRegistry<S> {
    pub fn new() -> Self {
        Self {
            table: PatternTable::new(),
        }
    }

    /// A registry with no guards; every transition is permitted.
    pub fn empty() -> Self {
        Self::new()
    }

    /// Register `guard` for every transition matching `pattern`.
    pub fn register(mut self, pattern: TransitionPattern<S>, guard: Guard<S>) -> Self {
        self.add(pattern, guard);
        self
    }

    /// Non-consuming form of [`register`](Self::register).
    pub fn add(&mut self, pattern: TransitionPattern<S>, guard: Guard<S>) -> &mut Self {
        let rendered = pattern.to_string();
        let keys = self.table.insert(pattern, guard);
        trace!(pattern = %rendered, keys, "Registered guard");
        self
    }

    /// `(from, to)`
    pub fn state_to_state(self, from: S, to: S, guard: Guard<S>) -> Self {
        self.register(TransitionPattern::exact(from, to), guard)
    }

    /// Every pairing of `from` and `to`.
    pub fn states_to_states(self, from: HashSet<S>, to: HashSet<S>, guard: Guard<S>) -> Self {
        self.register(TransitionPattern::new(from, to), guard)
    }

    /// `(from, *)`
    pub fn state_to_any(self, from: S, guard: Guard<S>) -> Self {
        self.register(TransitionPattern::leaving(from), guard)
    }

    /// `(*, to)`
    pub fn any_to_state(self, to: S, guard: Guard<S>) -> Self {
        self.register(TransitionPattern::entering(to), guard)
    }

    pub fn state_to_states(self, from: S, to: HashSet<S>, guard: Guard<S>) -> Self {
        self.register(TransitionPattern::new([from], to), guard)
    }

    pub fn states_to_state(self, from: HashSet<S>, to: S, guard: Guard<S>) -> Self {
        self.register(TransitionPattern::new(from, [to]), guard)
    }

    /// `(*, *)`
    pub fn any_to_any(self, guard: Guard<S>) -> Self {
        self.register(TransitionPattern::any(), guard)
    }

    /// All guards matching `transition`, gathered from all four tiers.
    pub fn guards_for(&self, transition: &Transition<S>) -> Vec<(Tier, &Guard<S>)> {
        self.table.matching(transition)
    }

    /// True iff every matching guard allows `transition`.
    pub fn evaluate(&self, transition: &Transition<S>) -> bool {
        self.guards_for(transition)
            .into_iter()
            .all(|(_, guard)| guard.check(transition))
    }

    /// Every matching guard that rejects `transition`.
    ///
    /// Unlike [`evaluate`](Self::evaluate) this does not stop at the first
    /// rejection.
    pub fn rejections(&self, transition: &Transition<S>) -> Vec<Rejection<S>> {
        self.guards_for(transition)
            .into_iter()
            .filter(|(_, guard)| !guard.check(transition))
            .map(|(tier, guard)| Rejection::GuardRejected {
                transition: transition.clone(),
                tier,
                guard: guard.label().map(str::to_string),
            })
            .collect()
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

impl<S: State> Default for GuardRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Disabled,
        EStop,
        AStop,
        Auto,
        Teleop,
        Test,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Disabled => "Disabled",
                Self::EStop => "EStop",
                Self::AStop => "AStop",
                Self::Auto => "Auto",
                Self::Teleop => "Teleop",
                Self::Test => "Test",
            }
        }
    }

    use TestState::*;

    fn t(from: TestState, to: TestState) -> Transition<TestState> {
        Transition::new(from, to).unwrap()
    }

    #[test]
    fn empty_registry_allows_everything() {
        let guards = GuardRegistry::<TestState>::empty();

        assert!(guards.is_empty());
        assert!(guards.evaluate(&t(Disabled, Auto)));
        assert!(guards.evaluate(&t(EStop, Teleop)));
    }

    #[test]
    fn leaving_guard_blocks_only_outgoing() {
        let guards = GuardRegistry::new().state_to_any(EStop, Guard::deny());

        assert!(!guards.evaluate(&t(EStop, Auto)));
        assert!(!guards.evaluate(&t(EStop, Disabled)));
        assert!(guards.evaluate(&t(Disabled, EStop)));
    }

    #[test]
    fn exact_guard_blocks_only_its_pair() {
        let guards = GuardRegistry::new().state_to_state(AStop, Auto, Guard::deny());

        assert!(!guards.evaluate(&t(AStop, Auto)));
        assert!(guards.evaluate(&t(AStop, Test)));
        assert!(guards.evaluate(&t(Disabled, Auto)));
    }

    #[test]
    fn every_matching_guard_must_pass() {
        let guards = GuardRegistry::new()
            .any_to_any(Guard::new(|_| true))
            .any_to_state(Auto, Guard::new(|_| true))
            .state_to_any(Disabled, Guard::new(|t: &Transition<TestState>| *t.to() != Auto));

        assert!(!guards.evaluate(&t(Disabled, Auto)));
        assert!(guards.evaluate(&t(Disabled, Teleop)));
        assert!(guards.evaluate(&t(Teleop, Auto)));
    }

    #[test]
    fn guards_are_gathered_from_all_four_tiers() {
        let guards = GuardRegistry::new()
            .any_to_any(Guard::named("any", |_| true))
            .any_to_state(Teleop, Guard::named("entering", |_| true))
            .state_to_any(Disabled, Guard::named("leaving", |_| true))
            .state_to_state(Disabled, Teleop, Guard::named("exact", |_| true));

        let found: Vec<(Tier, Option<&str>)> = guards
            .guards_for(&t(Disabled, Teleop))
            .into_iter()
            .map(|(tier, guard)| (tier, guard.label()))
            .collect();

        assert_eq!(
            found,
            vec![
                (Tier::Exact, Some("exact")),
                (Tier::Leaving, Some("leaving")),
                (Tier::Entering, Some("entering")),
                (Tier::AnyToAny, Some("any")),
            ]
        );
    }

    #[test]
    fn set_shapes_expand_to_every_pairing() {
        let guards = GuardRegistry::new()
            .states_to_states(
                HashSet::from([Auto, Teleop]),
                HashSet::from([Test, Disabled]),
                Guard::deny(),
            )
            .state_to_states(EStop, HashSet::from([Auto, Teleop]), Guard::deny())
            .states_to_state(HashSet::from([Test, AStop]), Teleop, Guard::deny());

        assert!(!guards.evaluate(&t(Auto, Test)));
        assert!(!guards.evaluate(&t(Teleop, Disabled)));
        assert!(guards.evaluate(&t(Auto, Teleop)));
        assert!(!guards.evaluate(&t(EStop, Teleop)));
        assert!(guards.evaluate(&t(EStop, Disabled)));
        assert!(!guards.evaluate(&t(AStop, Teleop)));
        assert!(guards.evaluate(&t(Disabled, Teleop)));
        assert_eq!(guards.len(), 3);
    }

    #[test]
    fn rejections_report_every_failing_guard() {
        let guards = GuardRegistry::new()
            .state_to_any(EStop, Guard::named("latched", |_| false))
            .any_to_state(Auto, Guard::named("field not ready", |_| false))
            .any_to_any(Guard::named("always fine", |_| true));

        let rejections = guards.rejections(&t(EStop, Auto));
        assert_eq!(rejections.len(), 2);
        assert_eq!(
            rejections[0],
            Rejection::GuardRejected {
                transition: t(EStop, Auto),
                tier: Tier::Leaving,
                guard: Some("latched".to_string()),
            }
        );
        assert!(matches!(
            &rejections[1],
            Rejection::GuardRejected { tier: Tier::Entering, .. }
        ));

        assert!(guards.rejections(&t(Disabled, Teleop)).is_empty());
    }

    #[test]
    fn add_registers_in_place() {
        let mut guards = GuardRegistry::new();
        guards
            .add(TransitionPattern::leaving(EStop), Guard::deny())
            .add(TransitionPattern::entering(EStop), Guard::new(|_| true));

        assert_eq!(guards.len(), 2);
        assert_eq!(guards.patterns()[0], TransitionPattern::leaving(EStop));
    }
}
