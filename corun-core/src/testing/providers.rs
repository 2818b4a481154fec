//! Mock async operation providers.
//!
//! A [`MockProvider`] hands out awaitables of either shape with a scripted
//! settlement and a [`Delivery`] mode that controls when (and how often)
//! the settlement is reported.

use crate::awaitable::{CallbackOp, Continuation, Deferred, Resolver};
use crate::failure::Settlement;
use crate::value::Value;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Value reported by the second settlement of [`Delivery::Twice`].
pub const DUPLICATE_MARKER: &str = "__duplicate_settlement__";

/// How a mock awaitable reports its settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Synchronously: a deferred is returned already settled, a callback op
    /// calls its continuation inside `invoke`.
    Immediate,
    /// From a spawned tokio task after the delay.
    After(Duration),
    /// Immediately, then a second time with [`DUPLICATE_MARKER`].
    Twice,
    /// Drop the resolver or continuation without reporting.
    Dropped,
    /// Keep the resolver or continuation alive without ever reporting.
    Never,
}

enum Held {
    Resolver(Resolver),
    Continuation(Continuation),
}

#[derive(Default)]
struct ProviderInner {
    invocations: AtomicUsize,
    held: Mutex<Vec<Held>>,
}

/// Provider of scripted awaitables.
///
/// Cloning shares the invocation counter and the held resolvers.
#[derive(Clone, Default)]
pub struct MockProvider {
    inner: Arc<ProviderInner>,
}

impl MockProvider {
    /// Create a provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations started: deferreds created plus callback ops
    /// invoked.
    pub fn invocations(&self) -> usize {
        self.inner.invocations.load(Ordering::SeqCst)
    }

    /// Number of resolvers or continuations held by [`Delivery::Never`].
    pub fn held(&self) -> usize {
        self.inner.held.lock().len()
    }

    /// A deferred result that settles with `settlement`.
    pub fn deferred(&self, settlement: Settlement, delivery: Delivery) -> Deferred {
        self.inner.invocations.fetch_add(1, Ordering::SeqCst);
        let (deferred, resolver) = Deferred::new();

        match delivery {
            Delivery::Immediate => {
                resolver.settle(settlement);
            }
            Delivery::After(delay) => {
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    resolver.settle(settlement);
                });
            }
            Delivery::Twice => {
                resolver.settle(settlement);
                resolver.resolve(DUPLICATE_MARKER);
            }
            Delivery::Dropped => drop(resolver),
            Delivery::Never => self.inner.held.lock().push(Held::Resolver(resolver)),
        }
        deferred
    }

    /// A callback-accepting operation that reports `settlement`.
    pub fn callback(&self, settlement: Settlement, delivery: Delivery) -> CallbackOp {
        let inner = Arc::clone(&self.inner);
        CallbackOp::new(move |k| {
            inner.invocations.fetch_add(1, Ordering::SeqCst);
            match delivery {
                Delivery::Immediate => k.settle(settlement),
                Delivery::After(delay) => {
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        k.settle(settlement);
                    });
                }
                Delivery::Twice => {
                    k.settle(settlement);
                    k.succeed(DUPLICATE_MARKER);
                }
                Delivery::Dropped => drop(k),
                Delivery::Never => inner.held.lock().push(Held::Continuation(k)),
            }
        })
    }

    /// Shorthand for a successful deferred.
    pub fn deferred_ok(&self, value: impl Into<Value>, delivery: Delivery) -> Deferred {
        self.deferred(Ok(value.into()), delivery)
    }

    /// Shorthand for a successful callback op.
    pub fn callback_ok(&self, value: impl Into<Value>, delivery: Delivery) -> CallbackOp {
        self.callback(Ok(value.into()), delivery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::Failure;

    #[test]
    fn counts_invocations_per_shape() {
        let provider = MockProvider::new();

        let _d = provider.deferred_ok("a", Delivery::Immediate);
        assert_eq!(provider.invocations(), 1);

        let op = provider.callback_ok("b", Delivery::Immediate);
        assert_eq!(provider.invocations(), 1);
        op.invoke(Continuation::new(|_, _| {}));
        assert_eq!(provider.invocations(), 2);
    }

    #[test]
    fn twice_reports_marker_second() {
        let provider = MockProvider::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        provider
            .callback(Err(Failure::new("disk-error")), Delivery::Twice)
            .invoke(Continuation::new(move |failure, value| {
                sink.lock().push(Continuation::to_settlement(failure, value));
            }));

        assert_eq!(
            *seen.lock(),
            vec![
                Err(Failure::new("disk-error")),
                Ok(Value::string(DUPLICATE_MARKER))
            ]
        );
    }

    #[test]
    fn never_holds_resolver() {
        let provider = MockProvider::new();
        let deferred = provider.deferred_ok(1, Delivery::Never);
        assert!(!deferred.is_settled());
        assert_eq!(provider.held(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn after_settles_later() {
        let provider = MockProvider::new();
        let deferred = provider.deferred_ok("late", Delivery::After(Duration::from_millis(50)));
        assert!(!deferred.is_settled());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(deferred.peek(), Some(Ok(Value::string("late"))));
    }
}
