//! Process-wide channel registration with set-once semantics.
//!
//! Hosts that cannot thread a [`Bridge`] through their call sites register the
//! channel once at startup and build bridges from the slot afterwards. The
//! slot can never be reassigned, so in-flight calls always see the channel
//! they started with.

use std::sync::{Arc, OnceLock};

use super::Channel;
use crate::bridge::Bridge;
use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};

/// Set-once holder for the process-wide channel.
pub struct ChannelSlot<C> {
    channel: OnceLock<Arc<C>>,
}

impl<C> std::fmt::Debug for ChannelSlot<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelSlot")
            .field("registered", &self.channel.get().is_some())
            .finish()
    }
}

impl<C> Default for ChannelSlot<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ChannelSlot<C> {
    /// Create an empty slot. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            channel: OnceLock::new(),
        }
    }

    /// Register the channel. Fails if one is already registered.
    pub fn set(&self, channel: C) -> BridgeResult<()> {
        self.channel
            .set(Arc::new(channel))
            .map_err(|_| BridgeError::ChannelAlreadySet)
    }

    /// The registered channel, if any.
    pub fn get(&self) -> Option<Arc<C>> {
        self.channel.get().cloned()
    }

    /// Whether a channel has been registered.
    pub fn is_set(&self) -> bool {
        self.channel.get().is_some()
    }
}

impl<C: Channel> ChannelSlot<C> {
    /// Build a bridge over the registered channel.
    ///
    /// Returns [`BridgeError::ChannelUnset`] if nothing was registered yet,
    /// or [`BridgeError::Config`] if `config` is invalid.
    pub fn bridge(&self, config: BridgeConfig) -> BridgeResult<Bridge<C>> {
        let channel = self.get().ok_or(BridgeError::ChannelUnset)?;
        Bridge::from_arc(channel, config)
    }
}
