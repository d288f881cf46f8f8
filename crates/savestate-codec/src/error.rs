//! Error types for the save-state codec.

use thiserror::Error;

/// Encode-time failures.
///
/// Nothing in here is recoverable: the caller holds data the codec refuses
/// to persist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanNotSaveGameError {
    #[error("cannot save object of untrusted class `{0}`")]
    UntrustedClass(String),
    #[error("cannot save mapping key of kind `{0}`")]
    UnsupportedKey(&'static str),
    #[error("payload text contains the reserved placeholder character `{0}`")]
    PlaceholderInString(char),
}

/// Decode-time failures.
///
/// Any of these means the save is corrupt or untrusted; the load must abort.
/// Decode never returns a partially reconstructed graph.
#[derive(Debug, Error)]
pub enum InvalidSaveGameError {
    #[error("class `{0}` is not trusted for loading")]
    UntrustedClass(String),
    #[error("unknown enum type `{0}`")]
    UnknownEnumType(String),
    #[error("enum `{enum_type}` has no member `{member}`")]
    UnknownEnumMember { enum_type: String, member: String },
    #[error("unrecognized tag in `{0}`")]
    MalformedTag(String),
    #[error("malformed integer payload `{0}`")]
    MalformedInt(String),
    #[error("malformed float payload `{0}`")]
    MalformedFloat(String),
    #[error("malformed enum payload `{0}`")]
    MalformedEnum(String),
    #[error("state payload for class `{0}` is not a mapping")]
    StateNotAMapping(String),
    #[error("state mapping for class `{class}` has non-string attribute key `{key}`")]
    StateKeyNotAString { class: String, key: String },
    #[error("restoring instance of `{class}` failed: {message}")]
    Restore { class: String, message: String },
    #[error("parse error: {0}")]
    Json(#[from] serde_json::Error),
}
