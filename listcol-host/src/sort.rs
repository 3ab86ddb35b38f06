//! Sort rewriting: a request to order a listing by a derived column becomes
//! a request to order by the column's backing attribute.

use crate::registry::ColumnRegistry;
use listcol_store::{MemoryAttributeStore, SortDirection};
use listcol_types::{ObjectId, ObjectKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// How attribute values compare when sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// Numeric prefix first, then the full string
    /// (see [`listcol_store::compare_numeric_then_string`]).
    #[default]
    NumericThenString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    /// Order by a listing column id, as requested by the UI.
    Column(String),
    /// Order by a stored attribute of the listed objects.
    Attribute { key: String, policy: SortPolicy },
}

/// The part of a listing query the rewriter looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub kind: ObjectKind,
    /// Only the main listing query is rewritten.
    pub main: bool,
    pub orderby: Option<OrderBy>,
    pub order: SortDirection,
}

impl ListingQuery {
    /// A main listing query ordered by `column`.
    pub fn ordered_by(kind: ObjectKind, column: &str, order: SortDirection) -> Self {
        Self {
            kind,
            main: true,
            orderby: Some(OrderBy::Column(column.to_string())),
            order,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SortRewriter {
    registry: Arc<ColumnRegistry>,
}

impl SortRewriter {
    pub fn new(registry: Arc<ColumnRegistry>) -> Self {
        Self { registry }
    }

    /// Rewrites `query` in place. Returns true if it was changed.
    ///
    /// The first attribute-sourced column (registration order) whose id
    /// equals the requested column wins; later matches are ignored.
    pub fn rewrite(&self, query: &mut ListingQuery) -> bool {
        if !query.main {
            return false;
        }
        let requested = match &query.orderby {
            Some(OrderBy::Column(id)) if !id.trim().is_empty() => id.clone(),
            _ => return false,
        };

        let mut matches = self
            .registry
            .columns_for(&query.kind)
            .filter(|(_, column)| column.id() == requested)
            .filter_map(|(instance, column)| {
                column
                    .attribute()
                    .map(|(key, _)| (instance.id().to_string(), key.to_string()))
            });

        let Some((instance, key)) = matches.next() else {
            return false;
        };
        for (ignored, _) in matches {
            debug!(column = %requested, winner = %instance, ignored = %ignored, "Sort key collision ignored");
        }

        debug!(column = %requested, key = %key, "Sort rewritten to attribute");
        query.orderby = Some(OrderBy::Attribute {
            key,
            policy: SortPolicy::NumericThenString,
        });
        true
    }
}

/// Runs a rewritten query's ordering against the in-memory store.
///
/// Queries that are not ordered by an attribute keep `ids` as given.
pub fn execute_order(
    store: &MemoryAttributeStore,
    query: &ListingQuery,
    ids: &[ObjectId],
) -> Vec<ObjectId> {
    match &query.orderby {
        Some(OrderBy::Attribute {
            key,
            policy: SortPolicy::NumericThenString,
        }) => store.order_ids(&query.kind, key, ids, query.order),
        _ => ids.to_vec(),
    }
}
