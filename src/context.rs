//! Call-scoped context carrier.
//!
//! A [`Context`] is an immutable, chainable key-value carrier passed
//! alongside a call's primary arguments. Deriving a context with
//! [`Context::with_value`] leaves the parent untouched; a lookup walks the
//! chain and returns the most recently attached entry for the requested
//! slot.
//!
//! Slots are keyed by the *type* of the stored value. A module that keeps
//! its slot type private therefore owns that slot exclusively: unrelated
//! code cannot read or overwrite it by guessing a key.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// An immutable, chainable carrier of out-of-band call data.
///
/// Cloning is cheap: derived contexts share their tail with the parent.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Entry>>,
}

struct Entry {
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Entry>>,
}

impl Context {
    /// An empty root context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context holding `value`, keyed by its type.
    ///
    /// The derived context shadows any previously attached value of the
    /// same type; every other slot reachable from `self` stays visible.
    pub fn with_value<V: Any + Send + Sync>(&self, value: V) -> Context {
        Context {
            head: Some(Arc::new(Entry {
                key: TypeId::of::<V>(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// The most recently attached value of type `V`, if any.
    ///
    /// Absence is a normal, silent case.
    pub fn value<V: Any + Send + Sync>(&self) -> Option<&V> {
        let mut entry = self.head.as_deref();
        while let Some(e) = entry {
            if e.key == TypeId::of::<V>() {
                return e.value.downcast_ref::<V>();
            }
            entry = e.parent.as_deref();
        }
        None
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0usize;
        let mut entry = self.head.as_deref();
        while let Some(e) = entry {
            depth += 1;
            entry = e.parent.as_deref();
        }
        f.debug_struct("Context").field("depth", &depth).finish()
    }
}
