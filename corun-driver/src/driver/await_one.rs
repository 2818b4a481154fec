//! One adapter for both awaitable shapes.
//!
//! Whatever the shape, the awaitable's eventual report is funneled into a
//! [`ResumeSlot`]: a one-shot channel that accepts the first settlement and
//! discards everything after it. The driver waits on the receiving end, so
//! it never blocks the thread and never sees more than one settlement per
//! step.

use corun_core::awaitable::{Awaitable, Continuation};
use corun_core::error::{CorunError, Result};
use corun_core::failure::Settlement;
use corun_core::types::{RunId, StepIndex};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

/// Accepts at most one settlement for one step.
pub(crate) struct ResumeSlot {
    run_id: RunId,
    step: StepIndex,
    sender: Mutex<Option<oneshot::Sender<Settlement>>>,
    discarded: AtomicUsize,
}

impl ResumeSlot {
    fn new(run_id: RunId, step: StepIndex) -> (Arc<Self>, oneshot::Receiver<Settlement>) {
        let (sender, receiver) = oneshot::channel();
        let slot = Arc::new(Self {
            run_id,
            step,
            sender: Mutex::new(Some(sender)),
            discarded: AtomicUsize::new(0),
        });
        (slot, receiver)
    }

    /// Deliver a settlement. Returns `false` if one was already delivered.
    pub(crate) fn deliver(&self, settlement: Settlement) -> bool {
        let Some(sender) = self.sender.lock().take() else {
            let discarded = self.discarded.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::warn!(
                run_id = %self.run_id,
                step = %self.step,
                discarded,
                "Duplicate settlement discarded"
            );
            return false;
        };

        // The receiver is gone only if the run future was dropped.
        let _ = sender.send(settlement);
        true
    }
}

/// Wait for `awaitable` to settle.
///
/// A deferred gets an observer registered; a callback op is invoked with a
/// `(failure, value)` continuation. Either way the first report wins.
pub(crate) async fn await_one(
    awaitable: Awaitable,
    run_id: RunId,
    step: StepIndex,
) -> Result<Settlement> {
    let (slot, receiver) = ResumeSlot::new(run_id, step);

    match awaitable {
        Awaitable::Deferred(deferred) => {
            deferred.on_settle(move |settlement| {
                slot.deliver(settlement);
            });
        }
        Awaitable::Callback(op) => {
            op.invoke(Continuation::new(move |failure, value| {
                slot.deliver(Continuation::to_settlement(failure, value));
            }));
        }
    }

    receiver
        .await
        .map_err(|_| CorunError::AwaitableAbandoned { run_id, step })
}
