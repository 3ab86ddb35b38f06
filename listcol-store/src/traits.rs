use crate::StoreResult;
use listcol_types::{ObjectId, ObjectKind};

/// External per-object key/value store.
///
/// Values are single strings; multi-valued attributes are out of scope.
pub trait AttributeStore: Send + Sync {
    /// Returns the value stored at `(kind, id, key)`, if any.
    fn get(&self, kind: &ObjectKind, id: ObjectId, key: &str) -> Option<String>;

    /// Stores `value` at `(kind, id, key)`, replacing any previous value.
    fn set(&self, kind: &ObjectKind, id: ObjectId, key: &str, value: &str) -> StoreResult<()>;
}

/// External lookup of related objects across kinds.
pub trait ObjectRelations: Send + Sync {
    /// Returns the object of kind `target` that owns `(kind, id)`, e.g. the
    /// post a comment was left on.
    fn parent(&self, kind: &ObjectKind, id: ObjectId, target: &ObjectKind) -> Option<ObjectId>;
}

impl<T: AttributeStore + ?Sized> AttributeStore for std::sync::Arc<T> {
    fn get(&self, kind: &ObjectKind, id: ObjectId, key: &str) -> Option<String> {
        (**self).get(kind, id, key)
    }

    fn set(&self, kind: &ObjectKind, id: ObjectId, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(kind, id, key, value)
    }
}

impl<T: ObjectRelations + ?Sized> ObjectRelations for std::sync::Arc<T> {
    fn parent(&self, kind: &ObjectKind, id: ObjectId, target: &ObjectKind) -> Option<ObjectId> {
        (**self).parent(kind, id, target)
    }
}
