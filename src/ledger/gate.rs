use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::sync::{Mutex, PoisonError};

use super::LedgerError;

type InitFuture<T> = Shared<BoxFuture<'static, Result<T, LedgerError>>>;

enum GateState<T> {
    Idle,
    Pending(InitFuture<T>),
    Ready(T),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPhase {
    Uninitialized,
    Initializing,
    Ready,
}

/// One-time asynchronous initialization.
///
/// The first caller starts `init`; everyone arriving while it runs awaits
/// the same shared future. Success is memoized. Failure is delivered to the
/// whole wave of waiters and then the gate resets, so the next call tries
/// again.
pub struct InitGate<T> {
    state: Mutex<GateState<T>>,
}

impl<T> Default for InitGate<T> {
    fn default() -> Self {
        Self { state: Mutex::new(GateState::Idle) }
    }
}

impl<T: Clone + Send + Sync + 'static> InitGate<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> InitPhase {
        match &*self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            GateState::Idle => InitPhase::Uninitialized,
            GateState::Pending(_) => InitPhase::Initializing,
            GateState::Ready(_) => InitPhase::Ready,
        }
    }

    pub async fn get_or_init<F, Fut>(&self, init: F) -> Result<T, LedgerError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, LedgerError>> + Send + 'static,
    {
        let pending = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            match &*state {
                GateState::Ready(value) => return Ok(value.clone()),
                GateState::Pending(fut) => fut.clone(),
                GateState::Idle => {
                    let fut = init().boxed().shared();
                    *state = GateState::Pending(fut.clone());
                    fut
                }
            }
        };

        let result = pending.clone().await;

        // Only the wave that owns the pending future may settle the state.
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let GateState::Pending(current) = &*state {
            if current.ptr_eq(&pending) {
                *state = match &result {
                    Ok(value) => GateState::Ready(value.clone()),
                    Err(_) => GateState::Idle,
                };
            }
        }
        result
    }
}
