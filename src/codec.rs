//! The two-method codec contract.
//!
//! [`Marshaler`] and [`Unmarshaler`] are the sole boundary between codec
//! implementations and their callers (including the registry). Per-call
//! configuration never widens these signatures; it travels on the
//! [`Context`] instead.

use serde::{Serialize, de::DeserializeOwned};

use crate::context::Context;
use crate::error::CodecError;

/// Encodes values to bytes.
pub trait Marshaler {
    /// Encode `value` into a fresh byte vector, honoring any encode options
    /// carried by `cx`.
    fn marshal<T: Serialize + ?Sized>(&self, cx: &Context, value: &T)
    -> Result<Vec<u8>, CodecError>;
}

/// Decodes bytes into values.
pub trait Unmarshaler {
    /// Decode `data` into `target`, honoring any decode options carried by
    /// `cx`.
    ///
    /// Empty (or all-whitespace) input is a well-formed empty document: the
    /// call succeeds and `target` keeps the value the caller passed in.
    fn unmarshal<T: DeserializeOwned>(
        &self,
        cx: &Context,
        data: &[u8],
        target: &mut T,
    ) -> Result<(), CodecError>;
}
