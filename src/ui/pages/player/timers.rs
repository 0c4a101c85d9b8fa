use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::{ComponentSender, PlayerInput};

/// Identifies one scheduled timeout. A timer message whose id no longer matches
/// the one held in state is stale and gets ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Owns a pending timeout. Dropping the handle cancels it.
#[derive(Debug)]
pub(super) struct TimerHandle {
    id: TimerId,
    token: CancellationToken,
}

impl TimerHandle {
    pub(super) fn id(&self) -> TimerId {
        self.id
    }

    pub(super) fn cancel(self) {
        trace!("Cancelling timer {:?}", self.id);
        self.token.cancel();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Schedules timeouts that post a message back to the component.
/// Every timer is a child of the component lifetime, so unmounting cancels all of them.
#[derive(Debug)]
pub(super) struct Timers {
    next_id: u64,
    lifetime: CancellationToken,
    sender: ComponentSender,
}

impl Timers {
    pub(super) fn new(sender: ComponentSender) -> Self {
        Self {
            next_id: 0,
            lifetime: CancellationToken::new(),
            sender,
        }
    }

    pub(super) fn schedule<F>(&mut self, delay: Duration, message: F) -> TimerHandle
    where
        F: FnOnce(TimerId) -> PlayerInput + Send + 'static,
    {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let token = self.lifetime.child_token();

        let cancelled = token.clone();
        let sender = self.sender.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => sender.input(message(id)),
                _ = cancelled.cancelled() => {}
            }
        });

        TimerHandle { id, token }
    }

    /// Token for other background work bound to the component lifetime.
    pub(super) fn lifetime(&self) -> CancellationToken {
        self.lifetime.clone()
    }

    pub(super) fn shutdown(&self) {
        self.lifetime.cancel();
    }
}
