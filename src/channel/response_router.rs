//! Outcome routing for pending method channel calls.
//!
//! Before a call is queued, the caller registers its [`RequestId`] and gets a
//! oneshot receiver back. The remote side later routes the [`Outcome`] by ID,
//! so outcomes can arrive in any order without being delivered to the wrong
//! caller.

use std::collections::HashMap;

use tokio::sync::oneshot;

use crate::protocol::{Outcome, RequestId};

pub(crate) struct ResponseRouter {
    state: std::sync::Mutex<RouterState>,
}

struct RouterState {
    pending: HashMap<RequestId, oneshot::Sender<Outcome>>,
    /// Set once the remote half is gone; no further registrations succeed.
    closed: bool,
}

impl ResponseRouter {
    pub(crate) fn new() -> Self {
        Self {
            state: std::sync::Mutex::new(RouterState {
                pending: HashMap::new(),
                closed: false,
            }),
        }
    }

    /// Register a pending call and return a receiver for its outcome.
    ///
    /// Returns `None` if the ID is already pending or the router is closed.
    pub(crate) fn register(&self, id: RequestId) -> Option<oneshot::Receiver<Outcome>> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.closed || state.pending.contains_key(&id) {
            return None;
        }

        let (tx, rx) = oneshot::channel();
        state.pending.insert(id, tx);
        Some(rx)
    }

    /// Deliver an outcome to the caller waiting on `id`.
    ///
    /// Returns `true` if the outcome was delivered. Outcomes for unknown IDs,
    /// or for callers that stopped waiting, are dropped.
    pub(crate) fn route(&self, id: RequestId, outcome: Outcome) -> bool {
        let tx = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.pending.remove(&id)
        };

        match tx {
            Some(sender) => sender.send(outcome).is_ok(),
            None => false,
        }
    }

    /// Forget a pending call without delivering anything.
    pub(crate) fn remove(&self, id: RequestId) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.pending.remove(&id).is_some()
    }

    pub(crate) fn pending_count(&self) -> usize {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.pending.len()
    }

    /// Stop accepting calls and drop every pending sender.
    ///
    /// Waiters observe a closed oneshot, which the channel reports as
    /// [`crate::BridgeError::ChannelClosed`].
    pub(crate) fn close(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.closed = true;
        let pending: Vec<_> = state.pending.drain().collect();
        drop(state);

        if !pending.is_empty() {
            log::debug!(
                target: "pagebridge::channel",
                "Closing router with {} pending call(s)",
                pending.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_duplicate_id_returns_none() {
        let router = ResponseRouter::new();
        let id = RequestId::new(1);

        assert!(router.register(id).is_some());
        assert!(router.register(id).is_none(), "duplicate ID should return None");
        assert_eq!(router.pending_count(), 1);
    }

    #[tokio::test]
    async fn route_delivers_outcome_to_waiter() {
        let router = ResponseRouter::new();
        let rx = router.register(RequestId::new(42)).expect("register");

        assert!(router.route(RequestId::new(42), Outcome::success(true)));
        assert_eq!(rx.await.expect("outcome"), Outcome::success(true));
        assert_eq!(router.pending_count(), 0);
    }

    #[tokio::test]
    async fn out_of_order_outcomes_reach_their_own_waiters() {
        let router = ResponseRouter::new();
        let rx1 = router.register(RequestId::new(1)).unwrap();
        let rx2 = router.register(RequestId::new(2)).unwrap();

        router.route(RequestId::new(2), Outcome::success(false));
        router.route(RequestId::new(1), Outcome::Unimplemented);

        assert_eq!(rx1.await.unwrap(), Outcome::Unimplemented);
        assert_eq!(rx2.await.unwrap(), Outcome::success(false));
    }

    #[test]
    fn route_returns_false_for_unknown_id() {
        let router = ResponseRouter::new();
        assert!(!router.route(RequestId::new(999), Outcome::success(true)));
    }

    #[test]
    fn route_after_receiver_dropped_returns_false() {
        let router = ResponseRouter::new();
        let rx = router.register(RequestId::new(1)).unwrap();
        drop(rx);

        assert!(!router.route(RequestId::new(1), Outcome::success(true)));
        assert_eq!(router.pending_count(), 0, "pending should be cleared");
    }

    #[test]
    fn remove_clears_pending_call() {
        let router = ResponseRouter::new();
        let _rx = router.register(RequestId::new(1)).unwrap();

        assert!(router.remove(RequestId::new(1)));
        assert!(!router.remove(RequestId::new(1)));
        assert_eq!(router.pending_count(), 0);
    }

    #[tokio::test]
    async fn close_fails_waiters_and_rejects_new_calls() {
        let router = ResponseRouter::new();
        let rx = router.register(RequestId::new(1)).unwrap();

        router.close();

        assert!(rx.await.is_err(), "waiter should see a closed channel");
        assert!(router.register(RequestId::new(2)).is_none());
        assert_eq!(router.pending_count(), 0);
    }
}
