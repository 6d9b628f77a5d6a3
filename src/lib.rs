//! # yamlcodec
//!
//! A registry-pluggable YAML codec with context-scoped encoder/decoder
//! options.
//!
//! ## Overview
//!
//! yamlcodec provides:
//! - **Two-method codec contract**: [`Marshaler`] / [`Unmarshaler`], shared
//!   by every format registered under the same abstraction
//! - **Context-scoped options**: per-call configuration (indent width,
//!   strict field checking) attached to a [`Context`] instead of widening
//!   call signatures
//! - **YAML adapter**: [`yaml::YamlCodec`], a thin pass-through to
//!   `serde_yaml` with pooled encode buffers
//! - **Proxy wrappers**: pre-bind options to any codec with
//!   [`yaml::wrap_marshaler`] / [`yaml::wrap_unmarshaler`]
//! - **Name-keyed registry**: [`CodecRegistry`] plus a process-wide
//!   [`global_registry`], populated by explicit startup calls
//!
//! ## Quick start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use yamlcodec::yaml::YamlCodec;
//! use yamlcodec::{Context, Marshaler, Unmarshaler};
//!
//! #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
//! struct Config {
//!     name: String,
//!     retries: u32,
//! }
//!
//! fn main() -> Result<(), yamlcodec::CodecError> {
//!     let cx = Context::new();
//!     let config = Config { name: "edge".into(), retries: 3 };
//!
//!     let bytes = YamlCodec.marshal(&cx, &config)?;
//!     let mut back = Config::default();
//!     YamlCodec.unmarshal(&cx, &bytes, &mut back)?;
//!     assert_eq!(back, config);
//!     Ok(())
//! }
//! ```
//!
//! ## Per-call options
//!
//! Options are mutators applied to the live encoder/decoder just before the
//! operation runs. Attach them to the call's context, or pre-bind them with
//! a proxy wrapper:
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use yamlcodec::yaml::{YamlCodec, set_indent, with_encoder_options, wrap_marshaler};
//! use yamlcodec::{Context, Marshaler};
//!
//! # fn main() -> Result<(), yamlcodec::CodecError> {
//! let value = BTreeMap::from([("a", BTreeMap::from([("b", 1)]))]);
//!
//! let cx = with_encoder_options(&Context::new(), [set_indent(4)]);
//! let per_call = YamlCodec.marshal(&cx, &value)?;
//!
//! // Same effect on every call, without remembering the option:
//! let pretty = wrap_marshaler(YamlCodec, [set_indent(4)]);
//! let bound = pretty.marshal(&Context::new(), &value)?;
//! assert_eq!(per_call, bound);
//! # Ok(())
//! # }
//! ```
//!
//! ## Registration
//!
//! Registration is an explicit call made by the owning process's startup
//! sequence, never an import side effect:
//!
//! ```rust
//! use yamlcodec::{global_registry, yaml};
//!
//! yaml::register(yaml::NAME);
//! let marshaler = global_registry()
//!     .marshaler(yaml::NAME)
//!     .expect("registered at startup");
//! ```
//!
//! Using [`yaml::YamlCodec`] directly never requires registration.

// Core modules
pub mod codec;
pub mod context;
pub mod error;
pub mod registry;
pub mod yaml;

mod pool;

// Re-exports for convenience
pub use codec::{Marshaler, Unmarshaler};
pub use context::Context;
pub use error::CodecError;
pub use registry::{
    CodecRegistry, DynMarshaler, DynUnmarshaler, MarshalerFactory, UnmarshalerFactory,
    global_registry,
};

// Internal test modules (see src/tests)
#[cfg(test)]
mod tests;
