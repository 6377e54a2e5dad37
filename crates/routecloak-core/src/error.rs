//! Error types for `routecloak-core`.
//!
//! Decoding never produces an error: an unrecognised token is a normal
//! `None`. Errors only arise when encoding a plain name that is outside the
//! accepted shape, or when building a link from mismatched route keys.

/// Errors from the segment codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The route secret was empty.
    #[error("route secret must not be empty")]
    EmptySecret,

    /// The plain segment name was empty.
    #[error("segment name must not be empty")]
    EmptySegment,

    /// The plain segment name exceeds the fixed block size.
    #[error("segment name is {len} bytes, maximum is {max}")]
    SegmentTooLong { len: usize, max: usize },

    /// The plain segment name contains a character outside `[a-z0-9-]`,
    /// or starts/ends with `-`.
    #[error("invalid character {ch:?} at position {position} in segment name")]
    InvalidCharacter { ch: char, position: usize },

    /// AES-256-GCM or HMAC setup failed.
    #[error("segment encryption failed: {reason}")]
    Encryption { reason: String },

    /// HKDF key derivation failed.
    #[error("key derivation failed for context '{context}': {reason}")]
    KeyDerivation { context: String, reason: String },
}

/// Errors from registry link building.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The key used in the master position is not a top-level module.
    #[error("'{symbol}' is not a top-level module")]
    NotAModule { symbol: &'static str },

    /// The key used in the module position is not a sub-module.
    #[error("'{symbol}' is not a sub-module")]
    NotASubModule { symbol: &'static str },

    /// The record id is empty or contains `/`, `?` or `#`, so it cannot
    /// stand as a single path segment.
    #[error("record id {id:?} cannot be used as a path segment")]
    InvalidRecordId { id: String },

    /// The registry holds no token for this symbol.
    #[error("no token registered for '{symbol}'")]
    MissingToken { symbol: &'static str },

    /// Encoding a vocabulary entry failed while filling the registry.
    #[error("route codec error: {0}")]
    Codec(#[from] CodecError),
}
