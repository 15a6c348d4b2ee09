//! A [`ResultSink`] that records every call for later inspection.

// Allow dead_code to suppress per-binary warnings.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use pagebridge::ResultSink;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Succeed(bool),
    Fail(String, String, Value),
    Unimplemented,
}

/// Cloneable recorder; clones share the same log so one copy can be moved
/// into the bridge while the test keeps another.
#[derive(Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ResultSink for RecordingSink {
    fn succeed(&mut self, value: bool) {
        self.calls.lock().unwrap().push(SinkCall::Succeed(value));
    }

    fn fail(&mut self, code: &str, message: &str, detail: Value) {
        self.calls
            .lock()
            .unwrap()
            .push(SinkCall::Fail(code.to_string(), message.to_string(), detail));
    }

    fn unimplemented(&mut self) {
        self.calls.lock().unwrap().push(SinkCall::Unimplemented);
    }
}
