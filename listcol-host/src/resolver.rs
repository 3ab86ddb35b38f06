//! Per-row value resolution.
//!
//! Resolution never fails: predicates hide cells, provider failures and
//! panics degrade to an empty value, missing attributes read as empty.
//! A panicking predicate hides its cell.

use crate::filters::OutputFilters;
use listcol_model::{Callback, ColumnDescriptor, ColumnProvider, ValueSource};
use listcol_store::{AttributeStore, ObjectRelations, StoreResult};
use listcol_types::{ObjectId, ObjectKind};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of resolving one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// `display` is the filtered value, `raw` the value before filtering.
    Value { display: String, raw: String },
    /// The visibility predicate hid the cell.
    Suppressed,
}

/// Computes column values from the attribute store or a provider.
#[derive(Clone)]
pub struct ValueResolver {
    store: Arc<dyn AttributeStore>,
    relations: Arc<dyn ObjectRelations>,
    filters: Arc<OutputFilters>,
}

impl ValueResolver {
    pub fn new(
        store: Arc<dyn AttributeStore>,
        relations: Arc<dyn ObjectRelations>,
        filters: OutputFilters,
    ) -> Self {
        Self {
            store,
            relations,
            filters: Arc::new(filters),
        }
    }

    pub fn store(&self) -> &dyn AttributeStore {
        self.store.as_ref()
    }

    /// Resolves `column` for one row of an `instance_kind` listing.
    pub fn resolve(
        &self,
        instance_kind: &ObjectKind,
        column: &ColumnDescriptor,
        object_id: ObjectId,
    ) -> Resolved {
        if !self.is_visible(column, object_id) {
            debug!(column = %column.id(), object_id = %object_id, "Cell suppressed by predicate");
            return Resolved::Suppressed;
        }

        let raw = match column.value_source() {
            ValueSource::Provider(provider) => self.call_provider(provider, column, object_id),
            ValueSource::Attribute { key, kind } => {
                self.read_attribute(instance_kind, kind, key, object_id)
            }
        };
        let display = self.filters.apply(column.id(), raw.clone());
        Resolved::Value { display, raw }
    }

    /// Maps a row id to the id the attribute is stored under.
    ///
    /// A comment listing reading a post attribute reads it from the
    /// comment's post. Other combinations keep the id. `None` means the
    /// related object could not be found.
    pub fn effective_id(
        &self,
        instance_kind: &ObjectKind,
        attribute_kind: &ObjectKind,
        object_id: ObjectId,
    ) -> Option<ObjectId> {
        match (instance_kind, attribute_kind) {
            (ObjectKind::Comment, ObjectKind::Post) => {
                self.relations.parent(instance_kind, object_id, attribute_kind)
            }
            _ => Some(object_id),
        }
    }

    fn read_attribute(
        &self,
        instance_kind: &ObjectKind,
        attribute_kind: &ObjectKind,
        key: &str,
        object_id: ObjectId,
    ) -> String {
        match self.effective_id(instance_kind, attribute_kind, object_id) {
            Some(effective) => self
                .store
                .get(attribute_kind, effective, key)
                .unwrap_or_default(),
            None => {
                debug!(
                    object_id = %object_id,
                    from = %instance_kind,
                    to = %attribute_kind,
                    "No related object, reading empty value"
                );
                String::new()
            }
        }
    }

    /// Writes through the same redirection used for reads.
    ///
    /// Returns `Ok(false)` when the related object could not be found.
    pub fn write_attribute(
        &self,
        instance_kind: &ObjectKind,
        attribute_kind: &ObjectKind,
        key: &str,
        object_id: ObjectId,
        value: &str,
    ) -> StoreResult<bool> {
        match self.effective_id(instance_kind, attribute_kind, object_id) {
            Some(effective) => {
                self.store.set(attribute_kind, effective, key, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn is_visible(&self, column: &ColumnDescriptor, object_id: ObjectId) -> bool {
        match panic::catch_unwind(AssertUnwindSafe(|| column.is_visible(object_id))) {
            Ok(visible) => visible,
            Err(_) => {
                warn!(
                    column = %column.id(),
                    predicate = column.visibility().map(Callback::name).unwrap_or_default(),
                    object_id = %object_id,
                    "Visibility predicate panicked, suppressing cell"
                );
                false
            }
        }
    }

    fn call_provider(
        &self,
        provider: &Callback<dyn ColumnProvider>,
        column: &ColumnDescriptor,
        object_id: ObjectId,
    ) -> String {
        let mut out = String::new();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            provider.get().provide(object_id, column, &mut out)
        }));
        match result {
            Ok(Ok(value)) => {
                out.push_str(&value);
                out
            }
            Ok(Err(e)) => {
                warn!(
                    column = %column.id(),
                    provider = %provider.name(),
                    object_id = %object_id,
                    error = %e,
                    "Column provider failed, rendering empty value"
                );
                String::new()
            }
            Err(_) => {
                warn!(
                    column = %column.id(),
                    provider = %provider.name(),
                    object_id = %object_id,
                    "Column provider panicked, rendering empty value"
                );
                String::new()
            }
        }
    }
}

impl std::fmt::Debug for ValueResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueResolver")
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}
