//! Lock-protected handle for machines driven from more than one thread.

use super::state_machine::StateMachine;
use crate::core::{Rejection, State, TransitionError};
use parking_lot::Mutex;
use std::sync::Arc;
use stillwater::validation::Validation;

/// Cloneable, thread-safe handle to a [`StateMachine`].
///
/// Every operation holds one lock for its whole duration, so a
/// [`try_change`](Self::try_change) evaluates guards, runs edges and commits
/// against a single consistent current state. Two callers can never both
/// pass their guards against the same pre-transition state.
///
/// Edges run while the lock is held. An edge must not call back into the
/// same handle; doing so deadlocks.
pub struct SharedStateMachine<S: State> {
    inner: Arc<Mutex<StateMachine<S>>>,
}

impl<S: State> SharedStateMachine<S> {
    pub fn new(machine: StateMachine<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(machine)),
        }
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> S {
        self.inner.lock().current_state().clone()
    }

    pub fn can_change(&self, to: &S) -> bool {
        self.inner.lock().can_change(to)
    }

    pub fn explain(&self, to: &S) -> Validation<(), Vec<Rejection<S>>> {
        self.inner.lock().explain(to)
    }

    /// Check, run edges and commit under a single lock.
    pub fn try_change(&self, to: S) -> Result<bool, TransitionError> {
        self.inner.lock().try_change(to)
    }

    pub fn force_set_state(&self, to: S) {
        self.inner.lock().force_set_state(to)
    }

    /// Run `f` against the machine while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut StateMachine<S>) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}

impl<S: State> Clone for SharedStateMachine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: State> From<StateMachine<S>> for SharedStateMachine<S> {
    fn from(machine: StateMachine<S>) -> Self {
        Self::new(machine)
    }
}
