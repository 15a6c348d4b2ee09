//! Call envelopes: the ordered field bundle submitted with each operation.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use super::operation::Operation;
use crate::error::{BridgeError, BridgeResult};

/// Page parameters or result data. `None` is forwarded as JSON `null`.
pub type PageMap = Option<Map<String, Value>>;

/// Ordered mapping from field name to value for one operation.
///
/// The field set and order always equal [`Operation::fields`] for the
/// envelope's operation; the only way to build one is through constructors
/// that enforce this.
#[derive(Debug, Clone, PartialEq)]
pub struct CallEnvelope {
    operation: Operation,
    fields: Vec<(&'static str, Value)>,
}

impl CallEnvelope {
    /// Build an envelope for `onNativePageResult`.
    pub fn page_result(
        unique_id: impl Into<String>,
        key: impl Into<String>,
        result_data: PageMap,
        params: PageMap,
    ) -> Self {
        Self::zip(
            Operation::OnNativePageResult,
            [
                Value::String(unique_id.into()),
                Value::String(key.into()),
                map_value(result_data),
                map_value(params),
            ],
        )
    }

    /// Build an envelope for one of the six page container events.
    ///
    /// Returns an error if `operation` is `onNativePageResult`, whose field
    /// list differs.
    pub fn page_event(
        operation: Operation,
        page_name: impl Into<String>,
        params: PageMap,
        unique_id: impl Into<String>,
    ) -> BridgeResult<Self> {
        if !operation.is_page_event() {
            return Err(BridgeError::EnvelopeShape {
                operation: operation.method_name(),
                expected: operation.fields().len(),
                got: 3,
            });
        }
        Ok(Self::zip(
            operation,
            [
                Value::String(page_name.into()),
                map_value(params),
                Value::String(unique_id.into()),
            ],
        ))
    }

    /// Build an envelope from raw values given in [`Operation::fields`] order.
    ///
    /// Used on the receiving side of a channel, where values arrive untyped.
    pub fn from_values(operation: Operation, values: Vec<Value>) -> BridgeResult<Self> {
        let expected = operation.fields().len();
        if values.len() != expected {
            return Err(BridgeError::EnvelopeShape {
                operation: operation.method_name(),
                expected,
                got: values.len(),
            });
        }
        Ok(Self::zip(operation, values))
    }

    fn zip(operation: Operation, values: impl IntoIterator<Item = Value>) -> Self {
        let fields = operation.fields().iter().copied().zip(values).collect();
        Self { operation, fields }
    }

    /// The operation this envelope belongs to.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Field names in wire order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Fields and values in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the envelope has no fields. Never true for a built envelope.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the envelope into a JSON object.
    ///
    /// Field order in the returned map follows `serde_json`'s map ordering;
    /// use the `Serialize` impl when wire order matters.
    pub fn into_json(self) -> Value {
        Value::Object(self.fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

impl Serialize for CallEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn map_value(map: PageMap) -> Value {
    map.map(Value::Object).unwrap_or(Value::Null)
}
