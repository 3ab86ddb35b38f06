//! Declarative (unvalidated) column and instance specifications.
//!
//! Every field is optional so a spec can be merged over defaults. Field
//! aliases accept the older `meta_key` / `meta_object_type` / `callback` /
//! `show_on_cb` / `quick_edit` spellings.

use crate::callback::{CallbackRef, ColumnProvider, VisibilityPredicate};
use crate::descriptor::FieldKind;
use serde::{Deserialize, Serialize};

/// Raw specification of one column.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawColumnSpec {
    pub id: Option<String>,
    pub title: Option<String>,
    pub sortable: Option<bool>,
    #[serde(alias = "show_on_cb")]
    pub visibility: Option<CallbackRef<dyn VisibilityPredicate>>,
    pub populate: RawPopulate,
    pub row_action: Option<RawRowAction>,
    #[serde(alias = "quick_edit")]
    pub inline_edit: Option<bool>,
    #[serde(alias = "field_type")]
    pub field_kind: Option<FieldKind>,
}

impl RawColumnSpec {
    /// Starts an attribute-sourced column.
    pub fn attribute(id: &str, title: &str, key: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            populate: RawPopulate {
                attribute_key: Some(key.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Starts a provider-sourced column.
    pub fn provider(id: &str, title: &str, provider: CallbackRef<dyn ColumnProvider>) -> Self {
        Self {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            populate: RawPopulate {
                provider: Some(provider),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = Some(true);
        self
    }

    pub fn inline_edit(mut self) -> Self {
        self.inline_edit = Some(true);
        self
    }

    pub fn with_field_kind(mut self, kind: FieldKind) -> Self {
        self.field_kind = Some(kind);
        self
    }

    pub fn with_object_kind(mut self, kind: &str) -> Self {
        self.populate.object_kind = Some(kind.to_string());
        self
    }

    pub fn with_visibility(mut self, predicate: CallbackRef<dyn VisibilityPredicate>) -> Self {
        self.visibility = Some(predicate);
        self
    }

    pub fn with_row_action(mut self, action: RawRowAction) -> Self {
        self.row_action = Some(action);
        self
    }
}

/// Value-source part of a raw column spec.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPopulate {
    #[serde(alias = "meta_key")]
    pub attribute_key: Option<String>,
    #[serde(alias = "meta_object_type")]
    pub object_kind: Option<String>,
    #[serde(alias = "callback")]
    pub provider: Option<CallbackRef<dyn ColumnProvider>>,
}

impl RawPopulate {
    /// Drops blank entries so that `attribute_key = ""` counts as absent.
    pub fn stripped(&self) -> Self {
        Self {
            attribute_key: non_blank(&self.attribute_key),
            object_kind: non_blank(&self.object_kind),
            provider: self.provider.clone().filter(|provider| !provider.is_blank()),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Raw hover link template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRowAction {
    pub base: String,
    /// Ordered `[key, value]` pairs; the value `#object_id#` is substituted.
    #[serde(alias = "args")]
    pub params: Vec<(String, String)>,
    pub rel: Option<String>,
    pub title: Option<String>,
}

impl RawRowAction {
    pub fn new(base: &str, title: &str) -> Self {
        Self {
            base: base.to_string(),
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn rel(mut self, rel: &str) -> Self {
        self.rel = Some(rel.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.base.trim().is_empty() && self.params.is_empty()
    }
}

/// What an instance does to the listing's columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceRole {
    /// Adds its columns.
    #[default]
    Columns,
    /// Removes one existing column.
    Unset,
    /// Relabels one existing column.
    Rename,
}

/// Raw specification of an extension instance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstanceSpec {
    pub id: String,
    pub object_kind: String,
    pub role: Option<InstanceRole>,
    pub columns: Vec<RawColumnSpec>,
}

impl InstanceSpec {
    pub fn new(id: &str, object_kind: &str) -> Self {
        Self {
            id: id.to_string(),
            object_kind: object_kind.to_string(),
            ..Default::default()
        }
    }

    pub fn column(mut self, column: RawColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    /// Returns the role, treating the reserved ids `unset` and `rename` as
    /// alterations when no role is given explicitly.
    pub fn effective_role(&self) -> InstanceRole {
        match (self.role, self.id.trim()) {
            (Some(role), _) => role,
            (None, "unset") => InstanceRole::Unset,
            (None, "rename") => InstanceRole::Rename,
            (None, _) => InstanceRole::Columns,
        }
    }
}
