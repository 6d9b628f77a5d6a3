//! Context-scoped encoder/decoder options.
//!
//! An option-mutator is a function applied to the live [`Encoder`] or
//! [`Decoder`] configuration just before the encode/decode operation runs.
//! Mutators travel out-of-band: attached to the call's [`Context`] under a
//! slot private to this module, and applied strictly in the order supplied.
//! Attaching replaces the whole slot (last write wins); the encode and
//! decode slots never interfere with each other or with unrelated context
//! data.
//!
//! New mutators are plain functions returning an [`EncoderOption`] or
//! [`DecoderOption`]; nothing else in the carrier or adapter needs to
//! change to support them.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

use super::{Decoder, Encoder};
use crate::codec::{Marshaler, Unmarshaler};
use crate::context::Context;
use crate::error::CodecError;

/// A unit of encode-time configuration change.
pub type EncoderOption = Arc<dyn Fn(&mut Encoder) + Send + Sync>;

/// A unit of decode-time configuration change.
pub type DecoderOption = Arc<dyn for<'a, 'de> Fn(&'a mut Decoder<'de>) + Send + Sync>;

/// Private context slot for encode options.
struct EncoderOptions(Vec<EncoderOption>);

/// Private context slot for decode options.
struct DecoderOptions(Vec<DecoderOption>);

/// Derive a context carrying `opts` for the encode path.
///
/// Replaces any encode options previously attached on this lineage; decode
/// options and unrelated context data are untouched. An empty list is legal
/// and equivalent to not attaching.
pub fn with_encoder_options(
    cx: &Context,
    opts: impl IntoIterator<Item = EncoderOption>,
) -> Context {
    cx.with_value(EncoderOptions(opts.into_iter().collect()))
}

/// The encode options attached to `cx`, most recent attachment only.
/// Absence yields an empty slice.
pub fn encoder_options(cx: &Context) -> &[EncoderOption] {
    cx.value::<EncoderOptions>()
        .map_or(&[], |opts| opts.0.as_slice())
}

/// Derive a context carrying `opts` for the decode path.
///
/// Symmetric to [`with_encoder_options`], under a distinct slot.
pub fn with_decoder_options(
    cx: &Context,
    opts: impl IntoIterator<Item = DecoderOption>,
) -> Context {
    cx.with_value(DecoderOptions(opts.into_iter().collect()))
}

/// The decode options attached to `cx`, most recent attachment only.
/// Absence yields an empty slice.
pub fn decoder_options(cx: &Context) -> &[DecoderOption] {
    cx.value::<DecoderOptions>()
        .map_or(&[], |opts| opts.0.as_slice())
}

/// Sets the indentation width (in spaces) used for nested block structures.
pub fn set_indent(spaces: usize) -> EncoderOption {
    Arc::new(move |encoder: &mut Encoder| encoder.set_indent(spaces))
}

/// Toggles strict rejection of input fields absent from the target's shape.
pub fn known_fields_only(enable: bool) -> DecoderOption {
    Arc::new(move |decoder: &mut Decoder<'_>| decoder.known_fields(enable))
}

/// Proxy that injects a fixed set of encode options on every call.
///
/// Produced by [`wrap_marshaler`].
pub struct OptMarshaler<M> {
    opts: Vec<EncoderOption>,
    inner: M,
}

/// Pre-bind `opts` to `inner`.
///
/// Every `marshal` call on the returned proxy attaches `opts` to the
/// caller's context, overwriting any encode options already attached there,
/// then delegates to `inner`. The value being encoded is never inspected or
/// transformed. Proxies nest; the one closest to the codec attaches last
/// and therefore wins.
pub fn wrap_marshaler<M: Marshaler>(
    inner: M,
    opts: impl IntoIterator<Item = EncoderOption>,
) -> OptMarshaler<M> {
    OptMarshaler {
        opts: opts.into_iter().collect(),
        inner,
    }
}

impl<M: Marshaler> Marshaler for OptMarshaler<M> {
    fn marshal<T: Serialize + ?Sized>(
        &self,
        cx: &Context,
        value: &T,
    ) -> Result<Vec<u8>, CodecError> {
        let cx = with_encoder_options(cx, self.opts.iter().cloned());
        self.inner.marshal(&cx, value)
    }
}

/// Proxy that injects a fixed set of decode options on every call.
///
/// Produced by [`wrap_unmarshaler`].
pub struct OptUnmarshaler<U> {
    opts: Vec<DecoderOption>,
    inner: U,
}

/// Pre-bind `opts` to `inner`; decode-path counterpart of
/// [`wrap_marshaler`].
pub fn wrap_unmarshaler<U: Unmarshaler>(
    inner: U,
    opts: impl IntoIterator<Item = DecoderOption>,
) -> OptUnmarshaler<U> {
    OptUnmarshaler {
        opts: opts.into_iter().collect(),
        inner,
    }
}

impl<U: Unmarshaler> Unmarshaler for OptUnmarshaler<U> {
    fn unmarshal<T: DeserializeOwned>(
        &self,
        cx: &Context,
        data: &[u8],
        target: &mut T,
    ) -> Result<(), CodecError> {
        let cx = with_decoder_options(cx, self.opts.iter().cloned());
        self.inner.unmarshal(&cx, data, target)
    }
}
