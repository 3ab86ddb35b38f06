//! Render pipeline: column titles, cells, sortable ids and edit-form fields
//! for every instance registered on a listing's object kind.

use crate::config::ListingConfig;
use crate::registry::{ColumnRegistry, InstanceBody};
use crate::resolver::{Resolved, ValueResolver};
use crate::row_action::{escape_html, render_row_action};
use listcol_model::{Alteration, ColumnDescriptor, InlineEditPayload};
use listcol_types::{ObjectId, ObjectKind};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Ordered `(column id, title)` pairs of a listing.
pub type ColumnTitles = Vec<(String, String)>;

#[derive(Debug, Clone)]
pub struct RenderPipeline {
    registry: Arc<ColumnRegistry>,
    resolver: ValueResolver,
    payload_class: String,
    leading_columns: usize,
}

impl RenderPipeline {
    pub fn new(registry: Arc<ColumnRegistry>, resolver: ValueResolver, config: &ListingConfig) -> Self {
        Self {
            registry,
            resolver,
            payload_class: config.payload_class.clone(),
            leading_columns: config.leading_columns,
        }
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn payload_class(&self) -> &str {
        &self.payload_class
    }

    // ================================================================
    // Titles / sortable ids
    // ================================================================

    /// Applies every instance of `kind` to the listing's existing titles.
    ///
    /// Deterministic and idempotent: `titles(titles(x)) == titles(x)`.
    pub fn titles(&self, kind: &ObjectKind, existing: &[(String, String)]) -> ColumnTitles {
        let mut titles = existing.to_vec();
        for instance in self.registry.instances_for(kind) {
            titles = match instance.body() {
                InstanceBody::Alteration(alteration) => alter_titles(titles, alteration),
                InstanceBody::Columns(validated) => {
                    inject_titles(titles, &validated.columns, self.leading_columns)
                }
            };
        }
        titles
    }

    /// Adds the ids of sortable columns to `existing`.
    pub fn sortable_ids(&self, kind: &ObjectKind, existing: &[String]) -> Vec<String> {
        let mut ids = existing.to_vec();
        for (_, column) in self.registry.columns_for(kind) {
            if column.sortable() && !ids.iter().any(|id| id == column.id()) {
                ids.push(column.id().to_string());
            }
        }
        ids
    }

    // ================================================================
    // Cells
    // ================================================================

    /// Renders one cell: the display value, then the row action, then the
    /// hidden inline-edit payload.
    ///
    /// Returns `None` for unknown columns, suppressed cells and cells with
    /// nothing to show.
    pub fn cell(&self, kind: &ObjectKind, column_id: &str, object_id: ObjectId) -> Option<String> {
        let column = self.registry.column(kind, column_id)?;
        let (display, raw) = match self.resolver.resolve(kind, column, object_id) {
            Resolved::Value { display, raw } => (display, raw),
            Resolved::Suppressed => return None,
        };

        let payload = self.payload_fragment(column, &raw, object_id);
        if display.is_empty() && payload.is_none() {
            debug!(column = %column_id, object_id = %object_id, "Empty cell");
            return None;
        }

        let mut cell = display;
        if let Some(action) = column.row_action() {
            cell.push_str(&render_row_action(action, object_id));
        }
        if let Some(payload) = payload {
            cell.push_str(&payload);
        }
        Some(cell)
    }

    fn payload_fragment(
        &self,
        column: &ColumnDescriptor,
        raw: &str,
        object_id: ObjectId,
    ) -> Option<String> {
        if !column.inline_editable() {
            return None;
        }
        let (key, _) = column.attribute()?;
        match InlineEditPayload::new(object_id)
            .with_value(key, raw)
            .to_fragment(&self.payload_class)
        {
            Ok(fragment) => Some(fragment),
            Err(e) => {
                warn!(column = %column.id(), object_id = %object_id, error = %e, "Failed to encode inline-edit payload");
                None
            }
        }
    }

    // ================================================================
    // Edit forms
    // ================================================================

    /// Quick-edit box fields for `column_id`, or `None` when the column is
    /// not inline-editable.
    pub fn quick_edit_fields(&self, kind: &ObjectKind, column_id: &str) -> Option<String> {
        let column = self
            .registry
            .column(kind, column_id)
            .filter(|column| column.inline_editable())?;
        let (key, _) = column.attribute()?;
        Some(format!(
            "<fieldset class=\"inline-edit-col-left\"><div class=\"inline-edit-col column-{id}\"><label class=\"inline-edit-group\"><span class=\"title\">{title}</span><span class=\"input-text-wrap\"><input type=\"{input}\" value=\"\" name=\"{name}\" class=\"ptitle\" /></span></label></div></fieldset>",
            id = escape_html(column.id()),
            title = escape_html(column.title()),
            input = escape_html(column.field_kind().input_type()),
            name = escape_html(key),
        ))
    }

    /// Bulk-edit box fields. Same markup as the quick-edit box.
    pub fn bulk_edit_fields(&self, kind: &ObjectKind, column_id: &str) -> Option<String> {
        self.quick_edit_fields(kind, column_id)
    }

    /// Extra inputs for the comment reply/edit form, one per inline-editable
    /// comment column.
    pub fn comment_reply_fields(&self) -> String {
        self.registry
            .columns_for(&ObjectKind::Comment)
            .filter(|(_, column)| column.inline_editable())
            .filter_map(|(_, column)| {
                let (key, _) = column.attribute()?;
                let name = escape_html(key);
                Some(format!(
                    "<div class=\"inside\"><label for=\"reply-{name}\">{title}</label><input type=\"{input}\" name=\"{name}\" value=\"\" id=\"reply-{name}\" /></div>",
                    title = escape_html(column.title()),
                    input = escape_html(column.field_kind().input_type()),
                ))
            })
            .collect()
    }
}

fn alter_titles(mut titles: ColumnTitles, alteration: &Alteration) -> ColumnTitles {
    match alteration {
        Alteration::Unset { column_id } => titles.retain(|(id, _)| id != column_id),
        Alteration::Rename { column_id, title } => {
            if let Some(entry) = titles.iter_mut().find(|(id, _)| id == column_id) {
                entry.1 = title.clone();
            }
        }
    }
    titles
}

/// `existing[..leading] + added + existing[leading..]`, keeping the first
/// occurrence of each id.
fn inject_titles(existing: ColumnTitles, added: &[ColumnDescriptor], leading: usize) -> ColumnTitles {
    let mut merged = existing;
    let tail = merged.split_off(leading.min(merged.len()));
    let mut seen: HashSet<String> = merged.iter().map(|(id, _)| id.clone()).collect();

    let added = added
        .iter()
        .map(|column| (column.id().to_string(), column.title().to_string()));
    for (id, title) in added.chain(tail) {
        if seen.insert(id.clone()) {
            merged.push((id, title));
        }
    }
    merged
}
