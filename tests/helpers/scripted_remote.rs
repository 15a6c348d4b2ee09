//! Remote-side fixtures built on [`MethodChannel`].

// Allow dead_code to suppress per-binary warnings.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use pagebridge::{Bridge, BridgeConfig, CallEnvelope, MethodChannel, Outcome};
use tokio::task::JoinHandle;

/// Every envelope the remote side received, in arrival order.
pub type Received = Arc<Mutex<Vec<CallEnvelope>>>;

/// Spawn a remote that answers every call with `outcome` and records the
/// envelopes it saw.
pub fn bridge_answering(
    outcome: Outcome,
    config: BridgeConfig,
) -> (Bridge<MethodChannel>, Received, JoinHandle<()>) {
    let (channel, remote) = MethodChannel::pair("test");
    let received: Received = Arc::default();

    let log = Arc::clone(&received);
    let server = tokio::spawn(remote.serve(move |call| {
        log.lock().unwrap().push(call.envelope);
        let outcome = outcome.clone();
        async move { outcome }
    }));

    let bridge = Bridge::with_config(channel, config).expect("valid config");
    (bridge, received, server)
}
