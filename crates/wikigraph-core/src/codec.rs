//! JSON and CBOR encoding helpers.
//!
//! JSON is the wire contract. CBOR carries the same serde shapes for
//! storage layers that want a compact binary form.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a value as compact JSON.
///
/// # Errors
///
/// Returns error if the value cannot be represented (e.g. an out-of-range
/// timestamp).
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    let json = serde_json::to_string(value).map_err(|e| CodecError::Encode(e.to_string()))?;
    tracing::trace!(bytes = json.len(), "Encoded JSON");
    Ok(json)
}

/// Encode a value as indented JSON.
///
/// # Errors
///
/// Returns error if the value cannot be represented.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| CodecError::Encode(e.to_string()))?;
    tracing::trace!(bytes = json.len(), "Encoded pretty JSON");
    Ok(json)
}

/// Decode a value from JSON text.
///
/// # Errors
///
/// Returns error on malformed JSON, missing required fields, type
/// mismatches, or malformed timestamps.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, CodecError> {
    serde_json::from_str(json).map_err(|e| {
        tracing::debug!(error = %e, "JSON decode failed");
        CodecError::Decode(e.to_string())
    })
}

/// Decode a value from JSON bytes.
///
/// # Errors
///
/// Returns error under the same conditions as [`from_json`].
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!(error = %e, bytes = bytes.len(), "JSON decode failed");
        CodecError::Decode(e.to_string())
    })
}

/// Encode a value as CBOR bytes.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn to_cbor<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Vec::new();
    ciborium::into_writer(value, &mut bytes).map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Decode a value from CBOR bytes.
///
/// # Errors
///
/// Returns error if deserialization fails.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    ciborium::from_reader(bytes).map_err(|e| CodecError::Decode(e.to_string()))
}

/// Errors for encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Serialization failed
    #[error("encoding failed: {0}")]
    Encode(String),
    /// Deserialization failed
    #[error("decoding failed: {0}")]
    Decode(String),
}
