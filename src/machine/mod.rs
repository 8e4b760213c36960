//! The state machine and its thread-safe handle.
//!
//! [`StateMachine`] is the synchronous engine meant to be driven once per
//! control-loop tick. [`SharedStateMachine`] wraps it in a single lock for
//! callers on more than one thread.

mod shared;
mod state_machine;

pub use shared::SharedStateMachine;
pub use state_machine::{StateMachine, DEFAULT_MACHINE_NAME};
