//! Caller-supplied callbacks: visibility predicates and value providers.
//!
//! Declarative specs (e.g. loaded from TOML) reference callbacks by name; the
//! name is resolved against a [`CallbackTable`] during validation. Code that
//! builds specs programmatically can attach closures directly.

use crate::descriptor::ColumnDescriptor;
use crate::error::ProviderError;
use listcol_types::ObjectId;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Decides whether a column is shown for one object.
pub trait VisibilityPredicate: Send + Sync {
    fn is_visible(&self, object_id: ObjectId) -> bool;
}

impl<F> VisibilityPredicate for F
where
    F: Fn(ObjectId) -> bool + Send + Sync,
{
    fn is_visible(&self, object_id: ObjectId) -> bool {
        self(object_id)
    }
}

/// Computes a column value on demand.
///
/// A provider may write into `out` instead of (or in addition to) returning
/// a value; the cell shows what was written followed by the returned string.
pub trait ColumnProvider: Send + Sync {
    fn provide(
        &self,
        object_id: ObjectId,
        column: &ColumnDescriptor,
        out: &mut String,
    ) -> Result<String, ProviderError>;
}

impl<F> ColumnProvider for F
where
    F: Fn(ObjectId, &ColumnDescriptor, &mut String) -> Result<String, ProviderError> + Send + Sync,
{
    fn provide(
        &self,
        object_id: ObjectId,
        column: &ColumnDescriptor,
        out: &mut String,
    ) -> Result<String, ProviderError> {
        self(object_id, column, out)
    }
}

/// A resolved, invocable callback with the name it was registered under.
pub struct Callback<T: ?Sized> {
    name: String,
    target: Arc<T>,
}

impl<T: ?Sized> Callback<T> {
    pub fn from_arc(name: impl Into<String>, target: Arc<T>) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self) -> &T {
        &self.target
    }
}

impl Callback<dyn VisibilityPredicate> {
    pub fn predicate<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(ObjectId) -> bool + Send + Sync + 'static,
    {
        Self::from_arc(name, Arc::new(f))
    }
}

impl Callback<dyn ColumnProvider> {
    pub fn provider<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(ObjectId, &ColumnDescriptor, &mut String) -> Result<String, ProviderError>
            + Send
            + Sync
            + 'static,
    {
        Self::from_arc(name, Arc::new(f))
    }
}

impl<T: ?Sized> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            target: Arc::clone(&self.target),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.name).finish()
    }
}

/// Reference to a callback inside a raw spec.
pub enum CallbackRef<T: ?Sized> {
    /// Looked up in the [`CallbackTable`] at validation time.
    Named(String),
    /// Attached directly by code.
    Direct(Callback<T>),
}

impl<T: ?Sized> CallbackRef<T> {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Returns the referenced name (`"<closure name>"` for direct callbacks).
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Direct(callback) => callback.name(),
        }
    }

    /// True for a named reference whose name is blank.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Named(name) if name.trim().is_empty())
    }
}

impl CallbackRef<dyn VisibilityPredicate> {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(ObjectId) -> bool + Send + Sync + 'static,
    {
        Self::Direct(Callback::<dyn VisibilityPredicate>::predicate("closure", f))
    }
}

impl CallbackRef<dyn ColumnProvider> {
    pub fn provider<F>(f: F) -> Self
    where
        F: Fn(ObjectId, &ColumnDescriptor, &mut String) -> Result<String, ProviderError>
            + Send
            + Sync
            + 'static,
    {
        Self::Direct(Callback::<dyn ColumnProvider>::provider("closure", f))
    }
}

impl<T: ?Sized> Clone for CallbackRef<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Named(name) => Self::Named(name.clone()),
            Self::Direct(callback) => Self::Direct(callback.clone()),
        }
    }
}

impl<T: ?Sized> fmt::Debug for CallbackRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Direct(callback) => f.debug_tuple("Direct").field(callback).finish(),
        }
    }
}

impl<'de, T: ?Sized> Deserialize<'de> for CallbackRef<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::Named)
    }
}

/// Named predicates and providers available to declarative specs.
#[derive(Default)]
pub struct CallbackTable {
    predicates: HashMap<String, Arc<dyn VisibilityPredicate>>,
    providers: HashMap<String, Arc<dyn ColumnProvider>>,
}

impl CallbackTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_predicate<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(ObjectId) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(f));
    }

    pub fn register_provider<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(ObjectId, &ColumnDescriptor, &mut String) -> Result<String, ProviderError>
            + Send
            + Sync
            + 'static,
    {
        self.providers.insert(name.into(), Arc::new(f));
    }

    /// Registers a provider implemented by a type rather than a closure.
    pub fn register_provider_arc(
        &mut self,
        name: impl Into<String>,
        provider: Arc<dyn ColumnProvider>,
    ) {
        self.providers.insert(name.into(), provider);
    }

    pub fn resolve_predicate(
        &self,
        reference: &CallbackRef<dyn VisibilityPredicate>,
    ) -> Option<Callback<dyn VisibilityPredicate>> {
        match reference {
            CallbackRef::Direct(callback) => Some(callback.clone()),
            CallbackRef::Named(name) => self
                .predicates
                .get(name.trim())
                .map(|target| Callback::from_arc(name.trim(), Arc::clone(target))),
        }
    }

    pub fn resolve_provider(
        &self,
        reference: &CallbackRef<dyn ColumnProvider>,
    ) -> Option<Callback<dyn ColumnProvider>> {
        match reference {
            CallbackRef::Direct(callback) => Some(callback.clone()),
            CallbackRef::Named(name) => self
                .providers
                .get(name.trim())
                .map(|target| Callback::from_arc(name.trim(), Arc::clone(target))),
        }
    }

    /// Returns registered provider names in sorted order.
    pub fn provider_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for CallbackTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut predicates: Vec<&String> = self.predicates.keys().collect();
        predicates.sort();
        f.debug_struct("CallbackTable")
            .field("predicates", &predicates)
            .field("providers", &self.provider_names())
            .finish()
    }
}
