//! Bridge configuration.
//!
//! Configuration is optional: `BridgeConfig::default()` reproduces the
//! baseline behavior (wait indefinitely, fixed-signature type errors).
//! It can also be read from a TOML file such as:
//!
//! ```toml
//! call_timeout_ms = 5000
//! type_error_mode = "descriptive"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

/// How a non-boolean success value is reported to a [`crate::ResultSink`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeErrorMode {
    /// `fail("return type error code dart code", "", "")`
    #[default]
    Compat,
    /// `fail("type_contract_violation", "<what was received>", <value>)`
    Descriptive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Upper bound on how long one call may wait for its outcome.
    /// `None` waits forever.
    pub call_timeout_ms: Option<u64>,
    pub type_error_mode: TypeErrorMode,
}

impl BridgeConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> BridgeResult<Self> {
        let config: BridgeConfig =
            toml::from_str(contents).map_err(|e| BridgeError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a TOML file.
    pub fn load(path: &Path) -> BridgeResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!(
            target: "pagebridge::config",
            "Loaded bridge config from {}",
            path.display()
        );
        Ok(config)
    }

    /// Reject settings the bridge cannot honor (a zero call timeout).
    pub fn validate(&self) -> BridgeResult<()> {
        if self.call_timeout_ms == Some(0) {
            return Err(BridgeError::config("call_timeout_ms must be > 0"));
        }
        Ok(())
    }

    /// The configured call timeout, if any.
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_ms.map(Duration::from_millis)
    }

    /// Set the call timeout, rounding sub-millisecond remainders up.
    ///
    /// `Duration::ZERO` is stored as `0` and rejected by [`Self::validate`].
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.call_timeout_ms = Some(millis.try_into().unwrap_or(u64::MAX));
        self
    }

    /// Set how non-boolean success values are reported.
    pub fn with_type_error_mode(mut self, mode: TypeErrorMode) -> Self {
        self.type_error_mode = mode;
        self
    }
}
