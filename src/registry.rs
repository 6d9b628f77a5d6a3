//! Name-keyed codec registry.
//!
//! The registry maps a caller-chosen name to constructors for the two codec
//! roles, so that "yaml" can be requested by name and used interchangeably
//! with any other format registered under the same abstraction.
//!
//! The typed [`Marshaler`]/[`Unmarshaler`] traits have generic methods and
//! cannot be boxed, so registered constructors produce [`DynMarshaler`] /
//! [`DynUnmarshaler`]: erased handles that bridge any typed codec through a
//! `serde_yaml::Value`. The hop value is the engine's own document model, so
//! everything the engine can represent (non-finite floats included) survives
//! erasure. The erased handles implement the typed traits themselves, so
//! they compose with proxy wrappers and generic callers.
//!
//! Registration is always an explicit call made by the owning process's
//! startup sequence; nothing in this crate registers itself as an import
//! side effect.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::{Serialize, de::DeserializeOwned};

use crate::codec::{Marshaler, Unmarshaler};
use crate::context::Context;
use crate::error::CodecError;

/// Constructor for a registered marshaler.
pub type MarshalerFactory = Arc<dyn Fn() -> DynMarshaler + Send + Sync>;

/// Constructor for a registered unmarshaler.
pub type UnmarshalerFactory = Arc<dyn Fn() -> DynUnmarshaler + Send + Sync>;

type MarshalFn =
    Arc<dyn Fn(&Context, &serde_yaml::Value) -> Result<Vec<u8>, CodecError> + Send + Sync>;
type UnmarshalFn =
    Arc<dyn Fn(&Context, &[u8]) -> Result<serde_yaml::Value, CodecError> + Send + Sync>;

/// An erased encode handle produced by registry lookup.
#[derive(Clone)]
pub struct DynMarshaler {
    marshal_fn: MarshalFn,
}

impl DynMarshaler {
    /// Erase a typed marshaler.
    pub fn new<M>(inner: M) -> Self
    where
        M: Marshaler + Send + Sync + 'static,
    {
        Self {
            marshal_fn: Arc::new(move |cx, value| inner.marshal(cx, value)),
        }
    }
}

impl Marshaler for DynMarshaler {
    fn marshal<T: Serialize + ?Sized>(
        &self,
        cx: &Context,
        value: &T,
    ) -> Result<Vec<u8>, CodecError> {
        let value = serde_yaml::to_value(value).map_err(|e| CodecError::Encode(Box::new(e)))?;
        (self.marshal_fn)(cx, &value)
    }
}

impl fmt::Debug for DynMarshaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynMarshaler").finish_non_exhaustive()
    }
}

/// An erased decode handle produced by registry lookup.
#[derive(Clone)]
pub struct DynUnmarshaler {
    unmarshal_fn: UnmarshalFn,
}

impl DynUnmarshaler {
    /// Erase a typed unmarshaler.
    pub fn new<U>(inner: U) -> Self
    where
        U: Unmarshaler + Send + Sync + 'static,
    {
        Self {
            unmarshal_fn: Arc::new(move |cx, data| {
                let mut value = serde_yaml::Value::Null;
                inner.unmarshal(cx, data, &mut value)?;
                Ok(value)
            }),
        }
    }
}

impl Unmarshaler for DynUnmarshaler {
    fn unmarshal<T: DeserializeOwned>(
        &self,
        cx: &Context,
        data: &[u8],
        target: &mut T,
    ) -> Result<(), CodecError> {
        let value = (self.unmarshal_fn)(cx, data)?;
        // An empty document decodes without touching the target.
        if value.is_null() && data.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        *target = serde_yaml::from_value(value).map_err(|e| CodecError::Decode(Box::new(e)))?;
        Ok(())
    }
}

impl fmt::Debug for DynUnmarshaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynUnmarshaler").finish_non_exhaustive()
    }
}

/// Thread-safe name-to-constructor registry for both codec roles.
#[derive(Default)]
pub struct CodecRegistry {
    marshalers: RwLock<HashMap<String, MarshalerFactory>>,
    unmarshalers: RwLock<HashMap<String, UnmarshalerFactory>>,
}

impl CodecRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a marshaler constructor under `name`, replacing any prior
    /// entry for that name.
    pub fn register_marshaler<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> DynMarshaler + Send + Sync + 'static,
    {
        self.marshalers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), Arc::new(factory));
    }

    /// Register an unmarshaler constructor under `name`, replacing any prior
    /// entry for that name.
    pub fn register_unmarshaler<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> DynUnmarshaler + Send + Sync + 'static,
    {
        self.unmarshalers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), Arc::new(factory));
    }

    /// Construct the marshaler registered under `name`.
    pub fn marshaler(&self, name: &str) -> Option<DynMarshaler> {
        let factory = self
            .marshalers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned();
        factory.map(|f| f())
    }

    /// Construct the unmarshaler registered under `name`.
    pub fn unmarshaler(&self, name: &str) -> Option<DynUnmarshaler> {
        let factory = self
            .unmarshalers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned();
        factory.map(|f| f())
    }

    /// Like [`CodecRegistry::marshaler`], with a lookup miss surfaced as an
    /// error.
    pub fn require_marshaler(&self, name: &str) -> Result<DynMarshaler, CodecError> {
        self.marshaler(name)
            .ok_or_else(|| CodecError::NotRegistered(name.to_string()))
    }

    /// Like [`CodecRegistry::unmarshaler`], with a lookup miss surfaced as
    /// an error.
    pub fn require_unmarshaler(&self, name: &str) -> Result<DynUnmarshaler, CodecError> {
        self.unmarshaler(name)
            .ok_or_else(|| CodecError::NotRegistered(name.to_string()))
    }

    /// Names with at least one registered role, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .marshalers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.extend(
            self.unmarshalers
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .keys()
                .cloned(),
        );
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// The process-wide default registry.
pub fn global_registry() -> &'static CodecRegistry {
    static GLOBAL: OnceLock<CodecRegistry> = OnceLock::new();
    GLOBAL.get_or_init(CodecRegistry::new)
}
