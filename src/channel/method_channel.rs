//! In-process named-method channel.
//!
//! [`MethodChannel::pair`] returns the host half, which implements
//! [`Channel`], and the remote half, which the embedded runtime side drives.
//! Calls flow host -> remote over an unbounded queue; outcomes flow back by
//! [`RequestId`] through a shared [`ResponseRouter`], so the remote may answer
//! in any order and from any task.
//!
//! Dropping the remote half closes the channel: queued and pending calls
//! resolve with [`BridgeError::ChannelClosed`], and later calls fail fast.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::mpsc;

use super::Channel;
use super::response_router::ResponseRouter;
use crate::error::{BridgeError, BridgeResult};
use crate::protocol::{CallEnvelope, Operation, Outcome, RequestId};

/// A call as seen by the remote side.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingCall {
    pub id: RequestId,
    /// Wire method name, always `envelope.operation().method_name()`.
    pub method: &'static str,
    pub envelope: CallEnvelope,
}

impl IncomingCall {
    /// The operation being called.
    pub fn operation(&self) -> Operation {
        self.envelope.operation()
    }

}

/// Host half of a method channel.
pub struct MethodChannel {
    name: String,
    calls: mpsc::UnboundedSender<IncomingCall>,
    router: Arc<ResponseRouter>,
    next_id: AtomicI64,
}

/// Remote half of a method channel.
pub struct MethodChannelRemote {
    name: String,
    calls: mpsc::UnboundedReceiver<IncomingCall>,
    router: Arc<ResponseRouter>,
}

/// Cloneable handle for answering calls from other tasks.
#[derive(Clone)]
pub struct Replier {
    router: Arc<ResponseRouter>,
}

impl MethodChannel {
    /// Create a connected host/remote pair named `name`.
    pub fn pair(name: impl Into<String>) -> (MethodChannel, MethodChannelRemote) {
        let name = name.into();
        let (tx, rx) = mpsc::unbounded_channel();
        let router = Arc::new(ResponseRouter::new());

        let host = MethodChannel {
            name: name.clone(),
            calls: tx,
            router: Arc::clone(&router),
            next_id: AtomicI64::new(1),
        };
        let remote = MethodChannelRemote {
            name,
            calls: rx,
            router,
        };
        (host, remote)
    }

    /// The channel name, used in log lines and errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calls submitted but not yet answered.
    pub fn pending_count(&self) -> usize {
        self.router.pending_count()
    }

    fn closed(&self) -> BridgeError {
        BridgeError::channel_closed(format!("method channel '{}' closed", self.name))
    }
}

impl std::fmt::Debug for MethodChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodChannel")
            .field("name", &self.name)
            .field("pending", &self.router.pending_count())
            .finish()
    }
}

/// Removes a pending registration if the call future is dropped before its
/// outcome arrives (e.g. on timeout).
struct PendingGuard<'a> {
    router: &'a ResponseRouter,
    id: RequestId,
    armed: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.router.remove(self.id);
        }
    }
}

impl Channel for MethodChannel {
    async fn invoke(&self, envelope: CallEnvelope) -> BridgeResult<Outcome> {
        let id = RequestId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let method = envelope.operation().method_name();

        let rx = self.router.register(id).ok_or_else(|| self.closed())?;
        let mut guard = PendingGuard {
            router: &self.router,
            id,
            armed: true,
        };

        let call = IncomingCall {
            id,
            method,
            envelope,
        };
        if self.calls.send(call).is_err() {
            return Err(self.closed());
        }
        log::trace!(
            target: "pagebridge::channel",
            "{}: queued {} (id={})",
            self.name,
            method,
            id
        );

        let outcome = rx.await.map_err(|_| self.closed());
        guard.armed = false;
        outcome
    }
}

impl MethodChannelRemote {
    /// The channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wait for the next call. Returns `None` once the host half is dropped
    /// and the queue is drained.
    pub async fn recv(&mut self) -> Option<IncomingCall> {
        self.calls.recv().await
    }

    /// Answer the call with `id`. Returns `false` if nobody is waiting for it.
    pub fn reply(&self, id: RequestId, outcome: Outcome) -> bool {
        route(&self.router, id, outcome)
    }

    /// A handle for replying from other tasks.
    pub fn replier(&self) -> Replier {
        Replier {
            router: Arc::clone(&self.router),
        }
    }

    /// Answer every incoming call with `handler`, one at a time, until the
    /// host half is dropped.
    pub async fn serve<F, Fut>(mut self, mut handler: F)
    where
        F: FnMut(IncomingCall) -> Fut,
        Fut: Future<Output = Outcome>,
    {
        while let Some(call) = self.calls.recv().await {
            let id = call.id;
            let outcome = handler(call).await;
            self.reply(id, outcome);
        }
        log::debug!(
            target: "pagebridge::channel",
            "{}: host side dropped, serve loop finished",
            self.name
        );
    }
}

impl Drop for MethodChannelRemote {
    fn drop(&mut self) {
        // Close the queue first so no call can slip in after the router drains.
        self.calls.close();
        self.router.close();
    }
}

impl Replier {
    /// Answer the call with `id`. Returns `false` if nobody is waiting for it.
    pub fn reply(&self, id: RequestId, outcome: Outcome) -> bool {
        route(&self.router, id, outcome)
    }
}

fn route(router: &ResponseRouter, id: RequestId, outcome: Outcome) -> bool {
    let delivered = router.route(id, outcome);
    if !delivered {
        log::debug!(
            target: "pagebridge::channel",
            "Dropping outcome for unknown or abandoned call id={}",
            id
        );
    }
    delivered
}
