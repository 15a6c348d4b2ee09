//! Correlation ID for calls in flight on a method channel.

/// Identifier pairing a call with its reply.
///
/// Wraps `i64` so it cannot be confused with other integers and can key the
/// pending-call map directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(i64);

impl RequestId {
    /// Create a new RequestId from an i64 value.
    #[inline]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[inline]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RequestId> for i64 {
    fn from(id: RequestId) -> Self {
        id.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_conversions() {
        let id: RequestId = 123.into();
        assert_eq!(id.as_i64(), 123);
        let raw: i64 = RequestId::new(456).into();
        assert_eq!(raw, 456);
    }

    #[test]
    fn request_id_hash() {
        use std::collections::HashMap;

        let mut map: HashMap<RequestId, &str> = HashMap::new();
        map.insert(RequestId::new(1), "first");
        map.insert(RequestId::new(2), "second");

        assert_eq!(map.get(&RequestId::new(1)), Some(&"first"));
        assert_eq!(map.get(&RequestId::new(3)), None);
    }
}
