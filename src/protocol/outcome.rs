//! The three-way result a channel yields for each call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the remote side reported for one call.
///
/// Produced exactly once per call by the channel and consumed exactly once
/// by the bridge's result translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The remote handler returned a value. The bridge expects a boolean.
    Success { value: Value },
    /// The remote handler reported a failure.
    Error {
        code: String,
        message: String,
        #[serde(default)]
        detail: Value,
    },
    /// The remote side has no handler for the method.
    Unimplemented,
}

impl Outcome {
    /// Create a success outcome carrying `value`.
    pub fn success(value: impl Into<Value>) -> Self {
        Outcome::Success {
            value: value.into(),
        }
    }

    /// Create an error outcome.
    pub fn error(code: impl Into<String>, message: impl Into<String>, detail: Value) -> Self {
        Outcome::Error {
            code: code.into(),
            message: message.into(),
            detail,
        }
    }

    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Success { .. } => "success",
            Outcome::Error { .. } => "error",
            Outcome::Unimplemented => "unimplemented",
        }
    }
}
