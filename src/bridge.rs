//! Page lifecycle bridge.
//!
//! [`Bridge`] forwards the seven page lifecycle operations to the embedded
//! runtime over a [`Channel`] and translates each three-way [`Outcome`] into a
//! boolean result or a [`CallError`].
//!
//! Two calling styles share one code path:
//! - `async` methods (`did_show_page_container`, ...) return
//!   `Result<bool, CallError>` directly
//! - [`Bridge::dispatch`] spawns the call and reports through a
//!   [`ResultSink`], invoking exactly one sink method per call
//!
//! Calls are independent: no state is shared between them beyond the channel
//! handle, and each outcome is delivered only to the call that produced it.

use std::sync::Arc;

use serde_json::Value;

use crate::channel::Channel;
use crate::config::BridgeConfig;
use crate::error::BridgeResult;
use crate::protocol::{CallEnvelope, Operation, Outcome, PageMap};
use crate::sink::{self, CallError, ResultSink};

/// Typed front end for the page lifecycle channel.
pub struct Bridge<C> {
    channel: Arc<C>,
    config: BridgeConfig,
}

impl<C> Clone for Bridge<C> {
    fn clone(&self) -> Self {
        Self {
            channel: Arc::clone(&self.channel),
            config: self.config.clone(),
        }
    }
}

impl<C> std::fmt::Debug for Bridge<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Translate a channel outcome into the bridge's boolean contract.
pub fn translate(outcome: Outcome) -> Result<bool, CallError> {
    match outcome {
        Outcome::Success {
            value: Value::Bool(value),
        } => Ok(value),
        Outcome::Success { value } => Err(CallError::TypeContract { found: value }),
        Outcome::Error {
            code,
            message,
            detail,
        } => Err(CallError::Remote {
            code,
            message,
            detail,
        }),
        Outcome::Unimplemented => Err(CallError::Unimplemented),
    }
}

impl<C: Channel> Bridge<C> {
    /// Create a bridge over `channel` with the default configuration.
    pub fn new(channel: C) -> Self {
        Self {
            channel: Arc::new(channel),
            config: BridgeConfig::default(),
        }
    }

    /// Create a bridge over `channel` with a validated configuration.
    pub fn with_config(channel: C, config: BridgeConfig) -> BridgeResult<Self> {
        Self::from_arc(Arc::new(channel), config)
    }

    /// Create a bridge over a shared channel with a validated configuration.
    ///
    /// Returns [`crate::BridgeError::Config`] if `config` fails
    /// [`BridgeConfig::validate`].
    pub fn from_arc(channel: Arc<C>, config: BridgeConfig) -> BridgeResult<Self> {
        config.validate()?;
        Ok(Self { channel, config })
    }

    /// The configuration this bridge was built with.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The underlying channel.
    pub fn channel(&self) -> &Arc<C> {
        &self.channel
    }

    /// Submit one envelope and wait for its translated outcome.
    ///
    /// The envelope is submitted exactly once. If a call timeout is
    /// configured and expires first, the call resolves with
    /// [`CallError::Timeout`] and any later outcome is discarded.
    pub async fn call(&self, envelope: CallEnvelope) -> Result<bool, CallError> {
        let operation = envelope.operation();
        log::debug!(target: "pagebridge::bridge", "Submitting {}", operation);

        let invocation = self.channel.invoke(envelope);
        let outcome = match self.config.call_timeout() {
            Some(limit) => match tokio::time::timeout(limit, invocation).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    log::warn!(
                        target: "pagebridge::bridge",
                        "{} did not resolve within {:?}",
                        operation,
                        limit
                    );
                    return Err(CallError::Timeout(limit));
                }
            },
            None => invocation.await,
        };

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!(target: "pagebridge::bridge", "{} transport failure: {}", operation, e);
                return Err(e.into());
            }
        };
        log::debug!(
            target: "pagebridge::bridge",
            "{} resolved with {}",
            operation,
            outcome.kind()
        );

        let result = translate(outcome);
        match &result {
            Err(CallError::TypeContract { found }) => log::warn!(
                target: "pagebridge::bridge",
                "{} returned non-boolean result: {}",
                operation,
                found
            ),
            Err(CallError::Remote { code, message, .. }) => log::warn!(
                target: "pagebridge::bridge",
                "{} failed remotely: {} {}",
                operation,
                code,
                message
            ),
            _ => {}
        }
        result
    }

    /// Submit one envelope and report the outcome through `result_sink`.
    ///
    /// Exactly one sink method is invoked when this future completes.
    pub async fn send(&self, envelope: CallEnvelope, result_sink: &mut dyn ResultSink) {
        let result = self.call(envelope).await;
        sink::deliver(result, result_sink, self.config.type_error_mode);
    }

    /// Spawn the call on the current tokio runtime and report through `sink`.
    ///
    /// Returns immediately. The sink is invoked once when the channel
    /// resolves, or never if the channel never resolves and no timeout is
    /// configured. Must be called from within a tokio runtime.
    pub fn dispatch<S>(&self, envelope: CallEnvelope, mut sink: S) -> tokio::task::JoinHandle<()>
    where
        S: ResultSink + 'static,
    {
        let bridge = self.clone();
        tokio::spawn(async move {
            bridge.send(envelope, &mut sink).await;
        })
    }

    async fn page_event(
        &self,
        operation: Operation,
        page_name: &str,
        params: PageMap,
        unique_id: &str,
    ) -> Result<bool, CallError> {
        let envelope = CallEnvelope::page_event(operation, page_name, params, unique_id)?;
        self.call(envelope).await
    }

    /// Forward the result a native page produced back to the page that opened it.
    pub async fn on_native_page_result(
        &self,
        unique_id: &str,
        key: &str,
        result_data: PageMap,
        params: PageMap,
    ) -> Result<bool, CallError> {
        self.call(CallEnvelope::page_result(unique_id, key, result_data, params))
            .await
    }

    /// Notify the runtime that a page container became visible.
    pub async fn did_show_page_container(
        &self,
        page_name: &str,
        params: PageMap,
        unique_id: &str,
    ) -> Result<bool, CallError> {
        self.page_event(Operation::DidShowPageContainer, page_name, params, unique_id)
            .await
    }

    /// Notify the runtime that a page container is about to become visible.
    pub async fn will_show_page_container(
        &self,
        page_name: &str,
        params: PageMap,
        unique_id: &str,
    ) -> Result<bool, CallError> {
        self.page_event(Operation::WillShowPageContainer, page_name, params, unique_id)
            .await
    }

    /// Notify the runtime that a page container is about to be hidden.
    pub async fn will_disappear_page_container(
        &self,
        page_name: &str,
        params: PageMap,
        unique_id: &str,
    ) -> Result<bool, CallError> {
        self.page_event(
            Operation::WillDisappearPageContainer,
            page_name,
            params,
            unique_id,
        )
        .await
    }

    /// Notify the runtime that a page container was hidden.
    pub async fn did_disappear_page_container(
        &self,
        page_name: &str,
        params: PageMap,
        unique_id: &str,
    ) -> Result<bool, CallError> {
        self.page_event(
            Operation::DidDisappearPageContainer,
            page_name,
            params,
            unique_id,
        )
        .await
    }

    /// Notify the runtime that a page container was created.
    pub async fn did_init_page_container(
        &self,
        page_name: &str,
        params: PageMap,
        unique_id: &str,
    ) -> Result<bool, CallError> {
        self.page_event(Operation::DidInitPageContainer, page_name, params, unique_id)
            .await
    }

    /// Notify the runtime that a page container is about to be destroyed.
    pub async fn will_dealloc_page_container(
        &self,
        page_name: &str,
        params: PageMap,
        unique_id: &str,
    ) -> Result<bool, CallError> {
        self.page_event(
            Operation::WillDeallocPageContainer,
            page_name,
            params,
            unique_id,
        )
        .await
    }
}
