//! Wildcardable transition patterns and their exact-match keys.
//!
//! A [`TransitionPattern`] names a *set* of from-states and a *set* of
//! to-states. An empty set means "any state" on that side. Registries never
//! store patterns directly: each pattern is expanded into [`PatternKey`]s,
//! where the wildcard is an explicit [`Endpoint::Any`], and a concrete
//! transition is looked up under exactly four keys, one per [`Tier`].

use super::state::State;
use super::transition::Transition;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One side of a [`PatternKey`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Endpoint<S: State> {
    /// Matches every state.
    Any,
    /// Matches only this state.
    Specific(S),
}

impl<S: State> Endpoint<S> {
    /// Check whether this endpoint admits `state`.
    pub fn matches(&self, state: &S) -> bool {
        match self {
            Self::Any => true,
            Self::Specific(s) => s == state,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl<S: State> fmt::Display for Endpoint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Specific(s) => f.write_str(s.name()),
        }
    }
}

/// Match generality of a [`PatternKey`] relative to a concrete transition.
///
/// The declaration order is the lookup order: edges run exact matches first
/// and any-to-any matches last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// `(from, to)`
    Exact,
    /// `(from, *)`
    Leaving,
    /// `(*, to)`
    Entering,
    /// `(*, *)`
    AnyToAny,
}

impl Tier {
    /// All tiers in lookup order.
    pub const ORDER: [Tier; 4] = [Tier::Exact, Tier::Leaving, Tier::Entering, Tier::AnyToAny];
}

/// Exact-match storage key produced by expanding a [`TransitionPattern`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PatternKey<S: State> {
    pub from: Endpoint<S>,
    pub to: Endpoint<S>,
}

impl<S: State> PatternKey<S> {
    pub fn new(from: Endpoint<S>, to: Endpoint<S>) -> Self {
        Self { from, to }
    }

    /// The tier a concrete transition would look this key up under.
    pub fn tier(&self) -> Tier {
        match (self.from.is_any(), self.to.is_any()) {
            (false, false) => Tier::Exact,
            (false, true) => Tier::Leaving,
            (true, false) => Tier::Entering,
            (true, true) => Tier::AnyToAny,
        }
    }

    /// The key under which `transition` is looked up for `tier`.
    pub fn for_tier(transition: &Transition<S>, tier: Tier) -> Self {
        let from = || Endpoint::Specific(transition.from().clone());
        let to = || Endpoint::Specific(transition.to().clone());
        match tier {
            Tier::Exact => Self::new(from(), to()),
            Tier::Leaving => Self::new(from(), Endpoint::Any),
            Tier::Entering => Self::new(Endpoint::Any, to()),
            Tier::AnyToAny => Self::new(Endpoint::Any, Endpoint::Any),
        }
    }

    /// All four lookup keys for `transition`, in [`Tier::ORDER`].
    pub fn lookups(transition: &Transition<S>) -> [(Tier, Self); 4] {
        Tier::ORDER.map(|tier| (tier, Self::for_tier(transition, tier)))
    }

    pub fn matches(&self, from: &S, to: &S) -> bool {
        self.from.matches(from) && self.to.matches(to)
    }
}

impl<S: State> fmt::Display for PatternKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Registration key generalizing over sets of from-states and to-states.
///
/// An empty set on either side means "any state" on that side. Patterns own
/// their sets and cannot be changed after construction.
///
/// # Example
///
/// ```rust
/// use modeshift::state_enum;
/// use modeshift::TransitionPattern;
///
/// state_enum! {
///     enum Mode {
///         Disabled,
///         EStop,
///         Teleop,
///     }
/// }
///
/// let leaving_estop = TransitionPattern::leaving(Mode::EStop);
/// assert!(leaving_estop.matches(&Mode::EStop, &Mode::Teleop));
/// assert!(!leaving_estop.matches(&Mode::Disabled, &Mode::Teleop));
///
/// let everything = TransitionPattern::any();
/// assert!(everything.matches(&Mode::Teleop, &Mode::Disabled));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionPattern<S: State> {
    from: HashSet<S>,
    to: HashSet<S>,
}

impl<S: State> TransitionPattern<S> {
    /// Create a pattern from arbitrary from/to collections.
    pub fn new<F, T>(from: F, to: T) -> Self
    where
        F: IntoIterator<Item = S>,
        T: IntoIterator<Item = S>,
    {
        Self {
            from: from.into_iter().collect(),
            to: to.into_iter().collect(),
        }
    }

    /// `(from, to)` for exactly one pair of states.
    pub fn exact(from: S, to: S) -> Self {
        Self::new([from], [to])
    }

    /// `(from, *)`: every transition out of `from`.
    pub fn leaving(from: S) -> Self {
        Self::new([from], [])
    }

    /// `(*, to)`: every transition into `to`.
    pub fn entering(to: S) -> Self {
        Self::new([], [to])
    }

    /// `(*, *)`: every transition.
    pub fn any() -> Self {
        Self::new([], [])
    }

    pub fn from_states(&self) -> &HashSet<S> {
        &self.from
    }

    pub fn to_states(&self) -> &HashSet<S> {
        &self.to
    }

    pub fn is_any_to_any(&self) -> bool {
        self.from.is_empty() && self.to.is_empty()
    }

    /// Check whether the concrete pair `(from, to)` falls under this pattern.
    pub fn matches(&self, from: &S, to: &S) -> bool {
        (self.from.is_empty() || self.from.contains(from))
            && (self.to.is_empty() || self.to.contains(to))
    }

    pub fn matches_transition(&self, transition: &Transition<S>) -> bool {
        self.matches(transition.from(), transition.to())
    }

    /// Expand into exact-match keys: the cross product of both sides, with an
    /// empty side standing for a single [`Endpoint::Any`].
    ///
    /// Always yields at least one key.
    pub fn expand(&self) -> Vec<PatternKey<S>> {
        let side = |states: &HashSet<S>| -> Vec<Endpoint<S>> {
            if states.is_empty() {
                vec![Endpoint::Any]
            } else {
                states.iter().cloned().map(Endpoint::Specific).collect()
            }
        };

        let from = side(&self.from);
        let to = side(&self.to);

        from.iter()
            .flat_map(|f| to.iter().map(move |t| PatternKey::new(f.clone(), t.clone())))
            .collect()
    }
}

impl<S: State> Default for TransitionPattern<S> {
    fn default() -> Self {
        Self::any()
    }
}

impl<S: State> fmt::Display for TransitionPattern<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side<S: State>(f: &mut fmt::Formatter<'_>, states: &HashSet<S>) -> fmt::Result {
            if states.is_empty() {
                return f.write_str("*");
            }
            let mut names: Vec<&str> = states.iter().map(|s| s.name()).collect();
            names.sort_unstable();
            write!(f, "{{{}}}", names.join(", "))
        }

        side(f, &self.from)?;
        f.write_str(" -> ")?;
        side(f, &self.to)
    }
}
