//! Typed single-key JSON envelopes.
//!
//! The provider wraps nearly every request and response body one level deep
//! under a key naming the resource type, e.g. `{"server": {...}}` or
//! `{"servers": [...]}`. [`Named`] produces that shape for request bodies
//! without untyped maps; [`unwrap`] extracts the inner value from a decoded
//! response.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Request body wrapper serializing as `{"<key>": <value>}`.
pub struct Named<'a, T: ?Sized> {
    key: &'static str,
    value: &'a T,
}

impl<'a, T: ?Sized> Named<'a, T> {
    /// Wrap `value` under `key`.
    #[must_use]
    pub fn new(key: &'static str, value: &'a T) -> Self {
        Self { key, value }
    }
}

impl<T: Serialize + ?Sized> Serialize for Named<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, self.value)?;
        map.end()
    }
}

/// Extract and decode the value stored under `key` in an enveloped
/// response. A missing key is reported as a decode failure.
pub fn unwrap<T: DeserializeOwned>(mut value: serde_json::Value, key: &str) -> Result<T> {
    match value.get_mut(key) {
        Some(inner) => serde_json::from_value(inner.take()).map_err(Error::Decode),
        None => Err(Error::Decode(<serde_json::Error as serde::de::Error>::custom(
            format!("response envelope is missing key `{key}`"),
        ))),
    }
}
