//! Deferred results: single-transition values with registered observers.

use super::callback::{CallbackOp, Continuation};
use crate::failure::{Failure, Settlement};
use crate::value::Value;
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

type Observer = Box<dyn FnOnce(Settlement) + Send>;

enum DeferredState {
    Pending(Vec<Observer>),
    Settled(Settlement),
    /// Every resolver was dropped before settling. Observers are dropped
    /// unrun.
    Abandoned,
}

struct Shared {
    state: Mutex<DeferredState>,
    resolvers: AtomicUsize,
}

impl Shared {
    fn new(state: DeferredState, resolvers: usize) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            resolvers: AtomicUsize::new(resolvers),
        })
    }
}

/// A value that transitions exactly once to success or failure.
///
/// Cloning a `Deferred` yields another handle to the same transition.
/// The paired [`Resolver`] performs the transition.
#[derive(Clone)]
pub struct Deferred {
    shared: Arc<Shared>,
}

/// The settling half of a [`Deferred`].
///
/// Only the first settlement takes effect; later calls return `false` and
/// change nothing. If the last resolver is dropped while the deferred is
/// still pending, the deferred is abandoned: its observers are dropped
/// without running, and any registered later are dropped too.
pub struct Resolver {
    shared: Arc<Shared>,
}

impl Deferred {
    /// Create a pending deferred and its resolver.
    pub fn new() -> (Deferred, Resolver) {
        let shared = Shared::new(DeferredState::Pending(Vec::new()), 1);
        (
            Deferred {
                shared: Arc::clone(&shared),
            },
            Resolver { shared },
        )
    }

    /// Create a deferred that has already succeeded.
    pub fn resolved(value: impl Into<Value>) -> Self {
        Self::settled(Ok(value.into()))
    }

    /// Create a deferred that has already failed.
    pub fn rejected(failure: impl Into<Failure>) -> Self {
        Self::settled(Err(failure.into()))
    }

    fn settled(settlement: Settlement) -> Self {
        Self {
            shared: Shared::new(DeferredState::Settled(settlement), 0),
        }
    }

    /// Adapt a callback-accepting operation into a deferred.
    ///
    /// The operation is invoked immediately. Its first report settles the
    /// deferred.
    pub fn from_operation(op: CallbackOp) -> Self {
        let (deferred, resolver) = Self::new();
        op.invoke(Continuation::new(move |failure, value| {
            resolver.settle(Continuation::to_settlement(failure, value));
        }));
        deferred
    }

    /// Spawn a future on the current tokio runtime and settle with its output.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Settlement> + Send + 'static,
    {
        let (deferred, resolver) = Self::new();
        tokio::spawn(async move {
            resolver.settle(future.await);
        });
        deferred
    }

    /// Register a continuation for the transition.
    ///
    /// If the deferred has already settled, the continuation runs right away
    /// on the calling thread. Otherwise it runs on whichever thread settles.
    /// On an abandoned deferred it is dropped without running.
    pub fn on_settle(&self, observer: impl FnOnce(Settlement) + Send + 'static) {
        let settlement = {
            let mut state = self.shared.state.lock();
            match &mut *state {
                DeferredState::Pending(observers) => {
                    observers.push(Box::new(observer));
                    return;
                }
                DeferredState::Settled(settlement) => settlement.clone(),
                DeferredState::Abandoned => {
                    drop(state);
                    drop(observer);
                    return;
                }
            }
        };
        observer(settlement);
    }

    /// Check whether the transition has happened.
    pub fn is_settled(&self) -> bool {
        matches!(*self.shared.state.lock(), DeferredState::Settled(_))
    }

    /// Check whether every resolver was dropped before settling.
    pub fn is_abandoned(&self) -> bool {
        matches!(*self.shared.state.lock(), DeferredState::Abandoned)
    }

    /// Get a copy of the settlement, if any.
    pub fn peek(&self) -> Option<Settlement> {
        match &*self.shared.state.lock() {
            DeferredState::Settled(settlement) => Some(settlement.clone()),
            DeferredState::Pending(_) | DeferredState::Abandoned => None,
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl Resolver {
    /// Settle with a success value.
    pub fn resolve(&self, value: impl Into<Value>) -> bool {
        self.settle(Ok(value.into()))
    }

    /// Settle with a failure.
    pub fn reject(&self, failure: impl Into<Failure>) -> bool {
        self.settle(Err(failure.into()))
    }

    /// Perform the transition.
    ///
    /// Returns `true` if this call settled the deferred. Observers run after
    /// the internal lock is released, each with its own clone.
    pub fn settle(&self, settlement: Settlement) -> bool {
        let observers = {
            let mut state = self.shared.state.lock();
            if !matches!(*state, DeferredState::Pending(_)) {
                return false;
            }
            let previous =
                std::mem::replace(&mut *state, DeferredState::Settled(settlement.clone()));
            let DeferredState::Pending(observers) = previous else {
                return false;
            };
            observers
        };

        for observer in observers {
            observer(settlement.clone());
        }
        true
    }
}

impl Clone for Resolver {
    fn clone(&self) -> Self {
        self.shared.resolvers.fetch_add(1, Ordering::SeqCst);
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        if self.shared.resolvers.fetch_sub(1, Ordering::SeqCst) != 1 {
            return;
        }
        let observers = {
            let mut state = self.shared.state.lock();
            if !matches!(*state, DeferredState::Pending(_)) {
                return;
            }
            std::mem::replace(&mut *state, DeferredState::Abandoned)
        };
        // Observers may own resources whose drop re-enters this deferred.
        drop(observers);
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}
