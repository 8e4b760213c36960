//! Modeshift: a guarded state transition engine for periodic control loops
//!
//! Modeshift tracks the operating mode of a controlled system, decides
//! whether a requested mode change is currently permitted, and runs
//! registered actions exactly once when a change is committed. It is meant to
//! be driven synchronously, once per control-loop tick.
//!
//! # Core Concepts
//!
//! - **State**: a closed, caller-defined enumeration via the `State` trait
//! - **Transition patterns**: sets of from/to states, empty meaning "any"
//! - **Guards**: pure predicates that must all pass for a change to commit
//! - **Edges**: side-effecting actions run in a fixed tier order on commit
//!
//! # Example
//!
//! ```rust
//! use modeshift::state_enum;
//! use modeshift::{Edge, EdgeRegistry, Guard, GuardRegistry, StateMachine, Transition};
//! use std::sync::{Arc, Mutex};
//!
//! state_enum! {
//!     enum RobotMode {
//!         Disabled,
//!         EStop,
//!         Autonomous,
//!         Teleop,
//!     }
//! }
//!
//! let last_enabled = Arc::new(Mutex::new(None));
//! let sink = Arc::clone(&last_enabled);
//!
//! let edges = EdgeRegistry::new().any_to_state(
//!     RobotMode::Disabled,
//!     Edge::infallible(move |t: &Transition<RobotMode>| {
//!         *sink.lock().unwrap() = Some(*t.from());
//!     }),
//! );
//! let guards = GuardRegistry::new().state_to_any(RobotMode::EStop, Guard::deny());
//!
//! let mut machine = StateMachine::new(RobotMode::Disabled, edges, guards);
//!
//! assert!(machine.try_change(RobotMode::Teleop).unwrap());
//! assert!(machine.try_change(RobotMode::Disabled).unwrap());
//! assert_eq!(*last_enabled.lock().unwrap(), Some(RobotMode::Teleop));
//!
//! assert!(machine.try_change(RobotMode::EStop).unwrap());
//! assert!(!machine.can_change(&RobotMode::Autonomous));
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod registry;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use core::{
    ActionError, Edge, Endpoint, Guard, PatternKey, Rejection, State, Tier, Transition,
    TransitionError, TransitionPattern,
};
pub use machine::{SharedStateMachine, StateMachine};
pub use registry::{EdgeRegistry, GuardRegistry};
