//! Error types for the protocol layer.
//!
//! Each crate in Nightfall defines its own error enum. A `ProtocolError`
//! always means the problem is in the shape of the data (bad bytes, a
//! malformed id), never in the game rules.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing required fields,
    /// or a role definition with the wrong field types.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A target id string could not be parsed.
    ///
    /// Target ids are either a player id or `center-<index>`; this is
    /// returned for an empty string or a `center-` prefix followed by
    /// something that is not an index.
    #[error("malformed target id: {0:?}")]
    MalformedTarget(String),
}
