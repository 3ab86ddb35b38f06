//! Attribute store boundary for listcol.
//!
//! listcol never owns data. Every column value it shows comes from an
//! external key/value store addressed by `(object kind, object id, key)`,
//! and cross-kind lookups (a comment row reading its post's attribute) go
//! through an external relation lookup.
//!
//! # Architecture
//!
//! - [`AttributeStore`] and [`ObjectRelations`] are the host-facing traits
//! - [`MemoryAttributeStore`] implements both for tests and previews
//! - [`ordering`] holds the numeric-then-string sort policy used when a
//!   listing is ordered by an attribute

mod error;
mod memory;
pub mod ordering;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{AttributeRecord, AttributeSnapshot, MemoryAttributeStore, RelationRecord};
pub use ordering::{SortDirection, compare_numeric_then_string};
pub use traits::{AttributeStore, ObjectRelations};
