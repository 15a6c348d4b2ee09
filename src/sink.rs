//! Caller-side result delivery.
//!
//! A [`ResultSink`] is handed to the bridge with each callback-style call and
//! receives exactly one of `succeed`, `fail` or `unimplemented` once the
//! channel resolves. The future-based API returns [`CallError`] instead;
//! [`CallError::deliver`] is the single place where errors turn into sink
//! calls, so both APIs report identically.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::config::TypeErrorMode;
use crate::error::BridgeError;

/// Error code reported for a non-boolean success under [`TypeErrorMode::Compat`].
pub const RETURN_TYPE_ERROR_CODE: &str = "return type error code dart code";

/// Error code reported for a non-boolean success under [`TypeErrorMode::Descriptive`].
pub const TYPE_CONTRACT_VIOLATION_CODE: &str = "type_contract_violation";

pub const CALL_TIMEOUT_CODE: &str = "call_timeout";
pub const TRANSPORT_ERROR_CODE: &str = "transport_error";

/// Receiver for the translated outcome of one call.
pub trait ResultSink: Send {
    fn succeed(&mut self, value: bool);

    fn fail(&mut self, code: &str, message: &str, detail: Value);

    fn unimplemented(&mut self);
}

/// Why a call did not produce a boolean.
#[derive(Debug, Error)]
pub enum CallError {
    /// The remote side explicitly reported failure
    #[error("Remote error {code}: {message}")]
    Remote {
        code: String,
        message: String,
        detail: Value,
    },

    /// The remote side has no handler for the operation
    #[error("Operation not implemented by remote side")]
    Unimplemented,

    /// The remote side returned success with a non-boolean value
    #[error("Expected boolean result, got {}", json_kind(.found))]
    TypeContract { found: Value },

    /// No outcome arrived within the configured call timeout
    #[error("No outcome within {0:?}")]
    Timeout(Duration),

    /// The call could not be submitted or the transport went away
    #[error(transparent)]
    Transport(#[from] BridgeError),
}

impl CallError {
    /// Report this error through `sink` with exactly one method call.
    pub fn deliver(self, sink: &mut dyn ResultSink, mode: TypeErrorMode) {
        match self {
            CallError::Remote {
                code,
                message,
                detail,
            } => sink.fail(&code, &message, detail),
            CallError::Unimplemented => sink.unimplemented(),
            CallError::TypeContract { found } => match mode {
                TypeErrorMode::Compat => sink.fail(RETURN_TYPE_ERROR_CODE, "", Value::from("")),
                TypeErrorMode::Descriptive => {
                    let message = format!("expected boolean result, got {}", json_kind(&found));
                    sink.fail(TYPE_CONTRACT_VIOLATION_CODE, &message, found)
                }
            },
            error @ CallError::Timeout(_) => {
                sink.fail(CALL_TIMEOUT_CODE, &error.to_string(), Value::Null)
            }
            CallError::Transport(error) => {
                sink.fail(TRANSPORT_ERROR_CODE, &error.to_string(), Value::Null)
            }
        }
    }
}

/// Deliver a whole call result (success or error) to `sink`.
pub fn deliver(result: Result<bool, CallError>, sink: &mut dyn ResultSink, mode: TypeErrorMode) {
    match result {
        Ok(value) => sink.succeed(value),
        Err(error) => error.deliver(sink, mode),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    enum Call {
        Succeed(bool),
        Fail(String, String, Value),
        Unimplemented,
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl ResultSink for Recorder {
        fn succeed(&mut self, value: bool) {
            self.0.push(Call::Succeed(value));
        }

        fn fail(&mut self, code: &str, message: &str, detail: Value) {
            self.0.push(Call::Fail(code.into(), message.into(), detail));
        }

        fn unimplemented(&mut self) {
            self.0.push(Call::Unimplemented);
        }
    }

    #[test]
    fn success_is_delivered_verbatim() {
        for value in [true, false] {
            let mut sink = Recorder::default();
            deliver(Ok(value), &mut sink, TypeErrorMode::Compat);
            assert_eq!(sink.0, vec![Call::Succeed(value)]);
        }
    }

    #[test]
    fn remote_error_is_propagated_verbatim() {
        let mut sink = Recorder::default();
        let error = CallError::Remote {
            code: "E1".into(),
            message: "boom".into(),
            detail: json!({"trace": [1, 2]}),
        };
        error.deliver(&mut sink, TypeErrorMode::Compat);
        assert_eq!(
            sink.0,
            vec![Call::Fail("E1".into(), "boom".into(), json!({"trace": [1, 2]}))]
        );
    }

    #[test]
    fn unimplemented_is_distinct_from_error() {
        let mut sink = Recorder::default();
        CallError::Unimplemented.deliver(&mut sink, TypeErrorMode::Compat);
        assert_eq!(sink.0, vec![Call::Unimplemented]);
    }

    #[test]
    fn type_contract_compat_uses_fixed_signature() {
        let mut sink = Recorder::default();
        CallError::TypeContract { found: json!("x") }.deliver(&mut sink, TypeErrorMode::Compat);
        assert_eq!(
            sink.0,
            vec![Call::Fail(RETURN_TYPE_ERROR_CODE.into(), String::new(), json!(""))]
        );
    }

    #[test]
    fn type_contract_descriptive_carries_offending_value() {
        let mut sink = Recorder::default();
        CallError::TypeContract { found: json!(3) }
            .deliver(&mut sink, TypeErrorMode::Descriptive);
        assert_eq!(
            sink.0,
            vec![Call::Fail(
                TYPE_CONTRACT_VIOLATION_CODE.into(),
                "expected boolean result, got number".into(),
                json!(3)
            )]
        );
    }

    #[test]
    fn timeout_and_transport_report_as_failures() {
        let mut sink = Recorder::default();
        CallError::Timeout(Duration::from_millis(250)).deliver(&mut sink, TypeErrorMode::Compat);
        CallError::from(BridgeError::channel_closed("remote dropped"))
            .deliver(&mut sink, TypeErrorMode::Compat);

        assert_eq!(
            sink.0,
            vec![
                Call::Fail(CALL_TIMEOUT_CODE.into(), "No outcome within 250ms".into(), Value::Null),
                Call::Fail(
                    TRANSPORT_ERROR_CODE.into(),
                    "Channel closed: remote dropped".into(),
                    Value::Null
                ),
            ]
        );
    }

    #[test]
    fn call_error_display() {
        assert_eq!(
            CallError::TypeContract { found: json!([]) }.to_string(),
            "Expected boolean result, got array"
        );
    }
}
