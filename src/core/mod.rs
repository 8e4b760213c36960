//! Core state machine types.
//!
//! This module contains the value types everything else is built from:
//! - States via the `State` trait
//! - Concrete transitions and wildcardable transition patterns
//! - Guard predicates and edge actions
//! - Errors and rejection reasons

mod edge;
mod error;
mod guard;
mod pattern;
mod state;
mod transition;

pub use edge::{Edge, EdgeAction};
pub use error::{ActionError, Rejection, TransitionError};
pub use guard::Guard;
pub use pattern::{Endpoint, PatternKey, Tier, TransitionPattern};
pub use state::State;
pub use transition::Transition;
