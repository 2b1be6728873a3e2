//! Type-erased values held by the response cache.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

/// A decoded response as stored in the [`ResponseCache`](crate::ResponseCache).
///
/// Structured payloads are stored behind an `Arc<dyn Any>` together with the
/// name of their type. Reading one back goes through [`downcast`], which
/// checks the type instead of trusting the caller.
///
/// [`downcast`]: CachedPayload::downcast
#[derive(Clone)]
pub enum CachedPayload {
    /// A structured value decoded from JSON.
    Object {
        /// The decoded value.
        value: Arc<dyn Any + Send + Sync>,
        /// `std::any::type_name` of the decoded value.
        type_name: &'static str,
    },
    /// Raw bytes of a binary or plain-text body.
    Bytes(Bytes),
}

impl CachedPayload {
    /// Wraps a decoded value.
    pub fn object<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::Object {
            value: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Wraps a raw body.
    pub fn bytes(body: impl Into<Bytes>) -> Self {
        Self::Bytes(body.into())
    }

    /// Returns a copy of the stored value if it is a `T`.
    ///
    /// Returns `None` for raw bodies and for objects of any other type.
    pub fn downcast<T>(&self) -> Option<T>
    where
        T: Any + Clone,
    {
        match self {
            Self::Object { value, .. } => value.downcast_ref::<T>().cloned(),
            Self::Bytes(_) => None,
        }
    }

    /// Returns the raw body, if this payload is one.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(body) => Some(body),
            Self::Object { .. } => None,
        }
    }

    /// Name of the stored type, `"bytes"` for raw bodies.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Object { type_name, .. } => type_name,
            Self::Bytes(_) => "bytes",
        }
    }
}

impl fmt::Debug for CachedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object { type_name, .. } => {
                f.debug_struct("Object").field("type_name", type_name).finish()
            }
            Self::Bytes(body) => f.debug_tuple("Bytes").field(&body.len()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Project {
        id: String,
    }

    #[test]
    fn test_downcast_to_stored_type() {
        let payload = CachedPayload::object(Project { id: "p1".into() });
        assert_eq!(
            payload.downcast::<Project>(),
            Some(Project { id: "p1".into() })
        );
        assert!(payload.as_bytes().is_none());
    }

    #[test]
    fn test_downcast_to_other_type_fails() {
        let payload = CachedPayload::object(vec![Project { id: "p1".into() }]);
        assert!(payload.downcast::<Project>().is_none());
        assert!(payload.type_name().contains("Vec"));
    }

    #[test]
    fn test_bytes_are_not_objects() {
        let payload = CachedPayload::bytes(&b"key=value"[..]);
        assert!(payload.downcast::<Bytes>().is_none());
        assert_eq!(payload.as_bytes().map(|b| b.as_ref()), Some(&b"key=value"[..]));
        assert_eq!(payload.type_name(), "bytes");
    }
}
