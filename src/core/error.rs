//! Error and rejection types for transition attempts.

use super::pattern::Tier;
use super::state::State;
use super::transition::Transition;
use thiserror::Error;

/// Failure raised by an edge action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{reason}")]
    Failed { reason: String },

    #[error(transparent)]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ActionError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while committing a transition.
///
/// A rejected change (self-transition or failing guard) is never an error;
/// only a failing edge action is.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Edge '{edge}' failed during transition from '{from}' to '{to}': {source}")]
    ActionFailed {
        from: String,
        to: String,
        edge: String,
        #[source]
        source: ActionError,
    },
}

/// One reason a requested change is not currently permitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection<S: State> {
    /// The requested state is the current state.
    SelfTransition { state: S },

    /// A matching guard returned false.
    GuardRejected {
        transition: Transition<S>,
        tier: Tier,
        guard: Option<String>,
    },
}
