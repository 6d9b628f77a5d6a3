//! Error taxonomy for codec operations.

use thiserror::Error;

/// Errors surfaced by marshal/unmarshal calls and registry lookups.
///
/// Failures propagate unchanged to the immediate caller; nothing here is
/// retried or suppressed, and no partial output accompanies an error.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input carries a field the target's shape does not declare.
    /// Only raised in strict decode mode.
    #[error("unknown field `{0}` not declared by the target")]
    UnknownField(String),

    /// The engine rejected the input, or the decoded document does not fit
    /// the target.
    #[error("decode failed: {0}")]
    Decode(Box<dyn std::error::Error + Send + Sync>),

    /// The engine could not represent the value, or failed while flushing
    /// trailing document state.
    #[error("encode failed: {0}")]
    Encode(Box<dyn std::error::Error + Send + Sync>),

    /// No codec is registered under the requested name.
    #[error("no codec registered under `{0}`")]
    NotRegistered(String),
}
