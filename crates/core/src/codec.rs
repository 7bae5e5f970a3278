// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire codec for registry entry payloads.
//!
//! Entries are UTF-8 JSON objects with `host` and `port` fields. The codec
//! is deliberately tolerant on the read side: a payload that does not
//! decode is reported, never panicked on, so one bad entry cannot take
//! down a cache rebuild.

use crate::instance::ServerInstance;
use thiserror::Error;

/// Errors from encoding or decoding an entry payload
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("failed to encode instance: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode entry payload: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("entry payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Encode an instance to its wire payload.
pub fn encode(instance: &ServerInstance) -> Result<Vec<u8>, SerializationError> {
    serde_json::to_vec(instance).map_err(SerializationError::Encode)
}

/// Decode a wire payload back into an instance.
pub fn decode(payload: &[u8]) -> Result<ServerInstance, SerializationError> {
    let text = std::str::from_utf8(payload)?;
    serde_json::from_str(text).map_err(SerializationError::Decode)
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
