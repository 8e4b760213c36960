//! Core State trait for operating modes.
//!
//! Every mode enumeration driven by a [`StateMachine`](crate::StateMachine)
//! implements this trait. States are plain values: two states are the same
//! state exactly when they compare equal.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for the operating modes of a controlled system.
///
/// # Required Traits
///
/// - `Clone`: states are copied into every [`Transition`](crate::Transition)
/// - `Eq` + `Hash`: states are used as registry keys, compared by value
/// - `Debug`: states are debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states can be published to telemetry
///
/// # Example
///
/// ```rust
/// use modeshift::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum ArmState {
///     Up,
///     Level,
///     Down,
/// }
///
/// impl State for ArmState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Up => "Up",
///             Self::Level => "Level",
///             Self::Down => "Down",
///         }
///     }
/// }
///
/// assert_eq!(ArmState::Level.name(), "Level");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
