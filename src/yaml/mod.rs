//! YAML codec adapter.
//!
//! [`YamlCodec`] fulfills the [`Marshaler`]/[`Unmarshaler`] contract over
//! `serde_yaml`. Each call constructs a fresh [`Encoder`] or [`Decoder`],
//! applies the option-mutators carried by the call's [`Context`] in order,
//! then performs exactly one encode or decode. YAML syntax, scalar tag
//! resolution and emission all belong to the engine; this module only
//! adapts them to the codec contract.

mod options;

pub use options::{
    DecoderOption, EncoderOption, OptMarshaler, OptUnmarshaler, decoder_options, encoder_options,
    known_fields_only, set_indent, with_decoder_options, with_encoder_options, wrap_marshaler,
    wrap_unmarshaler,
};

use serde::{Serialize, de::DeserializeOwned};

use crate::codec::{Marshaler, Unmarshaler};
use crate::context::Context;
use crate::error::CodecError;
use crate::pool::{self, PooledBuf};
use crate::registry::{CodecRegistry, DynMarshaler, DynUnmarshaler, global_registry};

/// Default registration name.
pub const NAME: &str = "yaml";

/// The engine's canonical block indent, in spaces.
const DEFAULT_INDENT: usize = 2;

/// Stateless YAML codec. Safe to share and call concurrently: every call
/// builds its own encoder/decoder and only borrows a pooled buffer for its
/// own duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Marshaler for YamlCodec {
    fn marshal<T: Serialize + ?Sized>(
        &self,
        cx: &Context,
        value: &T,
    ) -> Result<Vec<u8>, CodecError> {
        let mut encoder = Encoder::new(pool::acquire());
        for opt in encoder_options(cx) {
            opt(&mut encoder);
        }
        encoder.encode(value)?;
        Ok(encoder.finish())
    }
}

impl Unmarshaler for YamlCodec {
    fn unmarshal<T: DeserializeOwned>(
        &self,
        cx: &Context,
        data: &[u8],
        target: &mut T,
    ) -> Result<(), CodecError> {
        let mut decoder = Decoder::new(data);
        for opt in decoder_options(cx) {
            opt(&mut decoder);
        }
        decoder.decode(target)
    }
}

/// Live encode configuration bound to a pooled output buffer.
///
/// Option-mutators receive `&mut Encoder` before the encode runs; later
/// mutators override earlier ones' effect on the same setting.
pub struct Encoder {
    out: PooledBuf,
    indent: usize,
}

impl Encoder {
    pub(crate) fn new(out: PooledBuf) -> Self {
        Self {
            out,
            indent: DEFAULT_INDENT,
        }
    }

    /// Set the indentation width (in spaces) used for nested block
    /// structures. Widths below 1 are clamped to 1.
    pub fn set_indent(&mut self, spaces: usize) {
        self.indent = spaces.max(1);
    }

    /// Encode one document into the buffer.
    pub(crate) fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CodecError> {
        serde_yaml::to_writer(&mut *self.out, value).map_err(|e| CodecError::Encode(Box::new(e)))
    }

    /// Snapshot the emitted document; the pooled buffer is released when
    /// `self` drops.
    pub(crate) fn finish(self) -> Vec<u8> {
        if self.indent == DEFAULT_INDENT {
            self.out.to_vec()
        } else {
            reindent(&self.out, self.indent)
        }
    }
}

/// The engine always emits 2-space block indentation; rescale it to the
/// requested width. Multi-line strings come out as literal block scalars,
/// where only the header's levels are structural: content lines keep every
/// byte beyond that prefix, so string data is never reshaped. This also
/// keeps any explicit indentation indicator on the header accurate.
fn reindent(src: &[u8], width: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() / DEFAULT_INDENT * width + 1);
    // Lead of the block-scalar header whose content lines are pending.
    let mut block: Option<usize> = None;
    for line in src.split_inclusive(|&b| b == b'\n') {
        let lead = line.iter().take_while(|&&b| b == b' ').count();
        if let Some(header_lead) = block {
            if line.iter().all(|&b| matches!(b, b' ' | b'\n')) {
                out.extend_from_slice(line);
                continue;
            }
            if lead > header_lead {
                let depth = header_lead / DEFAULT_INDENT;
                out.resize(out.len() + depth * width, b' ');
                out.extend_from_slice(&line[header_lead..]);
                continue;
            }
            block = None;
        }
        let depth = lead / DEFAULT_INDENT;
        out.resize(out.len() + depth * width + lead % DEFAULT_INDENT, b' ');
        out.extend_from_slice(&line[lead..]);
        if ends_with_block_header(&line[lead..]) {
            block = Some(lead);
        }
    }
    out
}

/// Whether a line (lead stripped) ends in a literal/folded block-scalar
/// header such as `|`, `|-` or `>2+`.
fn ends_with_block_header(rest: &[u8]) -> bool {
    let line = rest.strip_suffix(b"\n").unwrap_or(rest);
    let token_start = line.iter().rposition(|&b| b == b' ').map_or(0, |i| i + 1);
    // A header token follows a `: ` or `- ` indicator, or stands alone for a
    // top-level scalar document.
    if token_start >= 2 && !matches!(line[token_start - 2], b':' | b'-') {
        return false;
    }
    let Some((&first, modifiers)) = line[token_start..].split_first() else {
        return false;
    };
    matches!(first, b'|' | b'>')
        && modifiers
            .iter()
            .all(|&b| matches!(b, b'-' | b'+' | b'1'..=b'9'))
}

/// Live decode configuration reading from an input slice.
///
/// Option-mutators receive `&mut Decoder` before the decode runs.
pub struct Decoder<'de> {
    input: &'de [u8],
    known_fields: bool,
}

impl<'de> Decoder<'de> {
    pub(crate) fn new(input: &'de [u8]) -> Self {
        Self {
            input,
            known_fields: false,
        }
    }

    /// Toggle strict rejection of input fields the target does not declare.
    pub fn known_fields(&mut self, enable: bool) {
        self.known_fields = enable;
    }

    pub(crate) fn decode<T: DeserializeOwned>(&mut self, target: &mut T) -> Result<(), CodecError> {
        // A well-formed empty document leaves the target as passed.
        if self.input.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        let de = serde_yaml::Deserializer::from_slice(self.input);
        if self.known_fields {
            let mut unknown: Option<String> = None;
            let value = serde_ignored::deserialize(de, |path| {
                if unknown.is_none() {
                    unknown = Some(path.to_string());
                }
            })
            .map_err(|e| CodecError::Decode(Box::new(e)))?;
            if let Some(field) = unknown {
                return Err(CodecError::UnknownField(field));
            }
            *target = value;
        } else {
            *target = T::deserialize(de).map_err(|e| CodecError::Decode(Box::new(e)))?;
        }
        Ok(())
    }
}

/// Insert the YAML codec's constructors into `registry` under `name`,
/// replacing any prior entries for that name.
pub fn register_into(registry: &CodecRegistry, name: &str) {
    registry.register_marshaler(name, || DynMarshaler::new(YamlCodec));
    registry.register_unmarshaler(name, || DynUnmarshaler::new(YamlCodec));
}

/// Register the YAML codec in the [`global_registry`] under `name`.
///
/// Intended to be called once from the owning process's startup sequence.
/// Using [`YamlCodec`] directly never requires registration.
pub fn register(name: &str) {
    register_into(global_registry(), name);
}
