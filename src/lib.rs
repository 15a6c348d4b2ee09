//! Typed bridge for forwarding native page lifecycle events to an embedded
//! runtime over a named-method channel.
//!
//! ```no_run
//! use pagebridge::{Bridge, MethodChannel, Outcome};
//!
//! # async fn demo() {
//! let (channel, remote) = MethodChannel::pair("pagebridge");
//! tokio::spawn(remote.serve(|_call| async { Outcome::success(true) }));
//!
//! let bridge = Bridge::new(channel);
//! let shown = bridge.did_show_page_container("home", None, "42").await;
//! assert!(matches!(shown, Ok(true)));
//! # }
//! ```

pub mod bridge;
pub mod channel;
pub mod config;
pub mod error;
pub mod protocol;
pub mod sink;

pub use bridge::{Bridge, translate};
pub use channel::{Channel, ChannelSlot, IncomingCall, MethodChannel, MethodChannelRemote, Replier};
pub use config::{BridgeConfig, TypeErrorMode};
pub use error::{BridgeError, BridgeResult};
pub use protocol::{CallEnvelope, Operation, Outcome, PageMap, RequestId};
pub use sink::{CallError, ResultSink};
