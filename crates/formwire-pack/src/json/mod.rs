//! JSON text format.
//!
//! Parsing and serialization are delegated to `serde_json`, built with
//! `preserve_order` so object keys come back out in the order they were
//! inserted.

pub mod error;

pub use error::JsonError;

use serde_json::Value;

/// Parses a complete JSON document into an untyped tree.
pub struct JsonDecoder;

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, input: &[u8]) -> Result<Value, JsonError> {
        if std::str::from_utf8(input).is_err() {
            return Err(JsonError::InvalidUtf8);
        }
        Ok(serde_json::from_slice(input)?)
    }
}

/// Serializes an untyped tree as compact JSON.
pub struct JsonEncoder;

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, JsonError> {
        Ok(serde_json::to_vec(value)?)
    }

    pub fn encode_pretty(&self, value: &Value) -> Result<Vec<u8>, JsonError> {
        Ok(serde_json::to_vec_pretty(value)?)
    }
}
