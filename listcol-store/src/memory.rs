//! In-memory attribute store.
//!
//! Reference implementation of [`AttributeStore`] and [`ObjectRelations`]
//! used by tests and the preview binary. Can be seeded from a JSON snapshot.

use crate::ordering::{SortDirection, compare_optional};
use crate::{AttributeStore, ObjectRelations, StoreError, StoreResult};
use listcol_types::{ObjectId, ObjectKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::debug;

type AttributeKey = (ObjectKind, ObjectId, String);
type RelationKey = (ObjectKind, ObjectId, ObjectKind);

/// One stored attribute in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    pub kind: ObjectKind,
    pub id: ObjectId,
    pub key: String,
    pub value: String,
}

/// One parent link in a snapshot (e.g. comment 7 belongs to post 3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub kind: ObjectKind,
    pub id: ObjectId,
    pub parent_kind: ObjectKind,
    pub parent_id: ObjectId,
}

/// Serializable content of a [`MemoryAttributeStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSnapshot {
    #[serde(default)]
    pub attributes: Vec<AttributeRecord>,
    #[serde(default)]
    pub relations: Vec<RelationRecord>,
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryAttributeStore {
    values: RwLock<BTreeMap<AttributeKey, String>>,
    parents: RwLock<BTreeMap<RelationKey, ObjectId>>,
}

impl MemoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a snapshot.
    pub fn from_snapshot(snapshot: AttributeSnapshot) -> StoreResult<Self> {
        let store = Self::new();
        for record in snapshot.attributes {
            store.set(&record.kind, record.id, &record.key, &record.value)?;
        }
        for relation in snapshot.relations {
            store.link_parent(
                relation.kind,
                relation.id,
                relation.parent_kind,
                relation.parent_id,
            );
        }
        Ok(store)
    }

    /// Parses a JSON snapshot and builds a store from it.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let snapshot: AttributeSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Returns the current content as a snapshot.
    pub fn snapshot(&self) -> AttributeSnapshot {
        let attributes = read(&self.values)
            .iter()
            .map(|((kind, id, key), value)| AttributeRecord {
                kind: kind.clone(),
                id: *id,
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        let relations = read(&self.parents)
            .iter()
            .map(|((kind, id, parent_kind), parent_id)| RelationRecord {
                kind: kind.clone(),
                id: *id,
                parent_kind: parent_kind.clone(),
                parent_id: *parent_id,
            })
            .collect();
        AttributeSnapshot {
            attributes,
            relations,
        }
    }

    /// Records that `(kind, id)` belongs to `(parent_kind, parent_id)`.
    pub fn link_parent(
        &self,
        kind: ObjectKind,
        id: ObjectId,
        parent_kind: ObjectKind,
        parent_id: ObjectId,
    ) {
        write(&self.parents).insert((kind, id, parent_kind), parent_id);
    }

    /// Removes a stored value. Returns the previous value, if any.
    pub fn remove(&self, kind: &ObjectKind, id: ObjectId, key: &str) -> Option<String> {
        write(&self.values).remove(&(kind.clone(), id, key.to_string()))
    }

    pub fn len(&self) -> usize {
        read(&self.values).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.values).is_empty()
    }

    /// Orders `ids` by the value stored under `key`, numeric-then-string.
    ///
    /// Objects without a value keep their relative order after all objects
    /// that have one.
    pub fn order_ids(
        &self,
        kind: &ObjectKind,
        key: &str,
        ids: &[ObjectId],
        direction: SortDirection,
    ) -> Vec<ObjectId> {
        let mut keyed: Vec<(ObjectId, Option<String>)> = ids
            .iter()
            .map(|id| (*id, self.get(kind, *id, key)))
            .collect();
        keyed.sort_by(|(_, a), (_, b)| compare_optional(a.as_deref(), b.as_deref(), direction));
        keyed.into_iter().map(|(id, _)| id).collect()
    }
}

impl AttributeStore for MemoryAttributeStore {
    fn get(&self, kind: &ObjectKind, id: ObjectId, key: &str) -> Option<String> {
        read(&self.values)
            .get(&(kind.clone(), id, key.to_string()))
            .cloned()
    }

    fn set(&self, kind: &ObjectKind, id: ObjectId, key: &str, value: &str) -> StoreResult<()> {
        if key.trim().is_empty() {
            return Err(StoreError::EmptyKey);
        }
        debug!(kind = %kind, id = %id, key = %key, "Attribute set");
        write(&self.values).insert((kind.clone(), id, key.to_string()), value.to_string());
        Ok(())
    }
}

impl ObjectRelations for MemoryAttributeStore {
    fn parent(&self, kind: &ObjectKind, id: ObjectId, target: &ObjectKind) -> Option<ObjectId> {
        read(&self.parents)
            .get(&(kind.clone(), id, target.clone()))
            .copied()
    }
}

// A poisoned lock still holds consistent data: every write is a single insert.
fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
