//! The transport seam between the bridge and the embedded runtime.
//!
//! ## Module Structure
//!
//! - `slot` - Assign-once, process-wide channel registration
//! - `response_router` - Pending-call bookkeeping keyed by [`RequestId`]
//! - `method_channel` - In-process named-method channel and its remote half
//!
//! [`RequestId`]: crate::protocol::RequestId

mod method_channel;
mod response_router;
mod slot;

use std::future::Future;
use std::sync::Arc;

use crate::error::BridgeResult;
use crate::protocol::{CallEnvelope, Outcome};

pub use method_channel::{IncomingCall, MethodChannel, MethodChannelRemote, Replier};
pub use slot::ChannelSlot;

/// A named-method channel to the embedded runtime.
///
/// The method name travels with the envelope
/// (`envelope.operation().method_name()`). An implementation yields exactly
/// one [`Outcome`] per call, or a [`crate::BridgeError`] when the transport
/// itself fails. A channel that never resolves leaves the call pending.
pub trait Channel: Send + Sync + 'static {
    fn invoke(
        &self,
        envelope: CallEnvelope,
    ) -> impl Future<Output = BridgeResult<Outcome>> + Send;
}

impl<C: Channel> Channel for Arc<C> {
    fn invoke(
        &self,
        envelope: CallEnvelope,
    ) -> impl Future<Output = BridgeResult<Outcome>> + Send {
        (**self).invoke(envelope)
    }
}
