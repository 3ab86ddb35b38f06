//! Column and instance validation.
//!
//! Rules are applied in a fixed order so that a spec with several problems
//! always reports the same one first.

use crate::callback::CallbackTable;
use crate::descriptor::{ColumnDescriptor, FieldKind, ParamValue, RowAction, RowActionParam, ValueSource};
use crate::error::ConfigError;
use crate::spec::{InstanceRole, InstanceSpec, RawColumnSpec, RawRowAction};
use listcol_types::{KindCatalog, ObjectKind};
use std::collections::HashSet;
use tracing::debug;

/// Defaults merged under every raw column spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefaults {
    pub sortable: bool,
    pub inline_editable: bool,
    pub field_kind: FieldKind,
    pub row_action_rel: String,
}

impl Default for ColumnDefaults {
    fn default() -> Self {
        Self {
            sortable: false,
            inline_editable: false,
            field_kind: FieldKind::Text,
            row_action_rel: "permalink".to_string(),
        }
    }
}

/// Everything validation needs to know about the owning instance and host.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub instance_id: &'a str,
    pub instance_kind: &'a ObjectKind,
    pub catalog: &'a KindCatalog,
    pub callbacks: &'a CallbackTable,
    pub defaults: &'a ColumnDefaults,
}

/// Host-wide inputs to validation, shared by every instance.
#[derive(Debug, Clone, Copy)]
pub struct HostContext<'a> {
    pub catalog: &'a KindCatalog,
    pub callbacks: &'a CallbackTable,
    pub defaults: &'a ColumnDefaults,
}

impl<'a> HostContext<'a> {
    /// Context for validating the columns of one instance.
    pub fn for_instance<'b>(
        &self,
        instance_id: &'b str,
        instance_kind: &'b ObjectKind,
    ) -> ValidationContext<'b>
    where
        'a: 'b,
    {
        ValidationContext {
            instance_id,
            instance_kind,
            catalog: self.catalog,
            callbacks: self.callbacks,
            defaults: self.defaults,
        }
    }
}

/// Validated columns of one instance.
#[derive(Debug, Clone)]
pub struct ValidatedColumns {
    pub columns: Vec<ColumnDescriptor>,
    /// True when any column is inline-editable; the instance then needs the
    /// inline-edit subscriptions.
    pub needs_inline_edit: bool,
}

/// Validates one raw column.
pub fn validate_column(
    raw: &RawColumnSpec,
    index: usize,
    ctx: &ValidationContext<'_>,
) -> Result<ColumnDescriptor, ConfigError> {
    let id = raw
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ConfigError::MissingId {
            instance: ctx.instance_id.to_string(),
            index,
        })?
        .to_string();

    let title = raw
        .title
        .as_deref()
        .filter(|title| !title.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingTitle { column: id.clone() })?
        .to_string();

    let visibility = match &raw.visibility {
        Some(reference) if !reference.is_blank() => Some(
            ctx.callbacks
                .resolve_predicate(reference)
                .ok_or_else(|| ConfigError::UncallableVisibilityPredicate {
                    column: id.clone(),
                    name: reference.name().to_string(),
                })?,
        ),
        _ => None,
    };

    let populate = raw.populate.stripped();
    let value_source = match (&populate.attribute_key, &populate.provider) {
        (None, None) => return Err(ConfigError::MissingValueSource { column: id }),
        (Some(_), Some(_)) => return Err(ConfigError::AmbiguousValueSource { column: id }),
        (None, Some(reference)) => ValueSource::Provider(
            ctx.callbacks
                .resolve_provider(reference)
                .ok_or_else(|| ConfigError::UncallableProvider {
                    column: id.clone(),
                    name: reference.name().to_string(),
                })?,
        ),
        (Some(key), None) => {
            let kind = match &populate.object_kind {
                Some(candidate) => ctx.catalog.validate(candidate),
                None => ctx.instance_kind.clone(),
            };
            ValueSource::Attribute {
                key: key.clone(),
                kind,
            }
        }
    };

    let inline_editable = raw.inline_edit.unwrap_or(ctx.defaults.inline_editable);
    if inline_editable && !matches!(value_source, ValueSource::Attribute { .. }) {
        return Err(ConfigError::InlineEditRequiresAttribute { column: id });
    }

    Ok(ColumnDescriptor {
        row_action: raw
            .row_action
            .as_ref()
            .and_then(|action| build_row_action(action, &ctx.defaults.row_action_rel)),
        sortable: raw.sortable.unwrap_or(ctx.defaults.sortable),
        field_kind: raw
            .field_kind
            .clone()
            .unwrap_or_else(|| ctx.defaults.field_kind.clone()),
        id,
        title,
        visibility,
        value_source,
        inline_editable,
    })
}

/// Validates every column of a `Columns` instance.
pub fn validate_columns(
    raw: &[RawColumnSpec],
    ctx: &ValidationContext<'_>,
) -> Result<ValidatedColumns, ConfigError> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(raw.len());
    for (index, spec) in raw.iter().enumerate() {
        let column = validate_column(spec, index, ctx)?;
        if !seen.insert(column.id().to_string()) {
            return Err(ConfigError::DuplicateColumnId {
                column: column.id().to_string(),
            });
        }
        columns.push(column);
    }

    let needs_inline_edit = columns.iter().any(ColumnDescriptor::inline_editable);
    debug!(
        instance = %ctx.instance_id,
        columns = columns.len(),
        needs_inline_edit,
        "Columns validated"
    );
    Ok(ValidatedColumns {
        columns,
        needs_inline_edit,
    })
}

/// Target of an `unset` or `rename` instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alteration {
    Unset { column_id: String },
    Rename { column_id: String, title: String },
}

impl Alteration {
    pub fn column_id(&self) -> &str {
        match self {
            Self::Unset { column_id } | Self::Rename { column_id, .. } => column_id,
        }
    }
}

/// Validates an alteration instance: exactly one column naming the target,
/// plus a title for renames. Value sources are not required.
pub fn validate_alteration(spec: &InstanceSpec) -> Result<Alteration, ConfigError> {
    let instance = spec.id.trim().to_string();
    let column = match spec.columns.as_slice() {
        [column] => column,
        columns => {
            return Err(ConfigError::AlterationColumnCount {
                instance,
                count: columns.len(),
            });
        }
    };

    let column_id = column
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ConfigError::MissingAlterationTarget {
            instance: instance.clone(),
        })?
        .to_string();

    match spec.effective_role() {
        InstanceRole::Rename => {
            let title = column
                .title
                .as_deref()
                .filter(|title| !title.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingRenameTitle {
                    column: column_id.clone(),
                })?
                .to_string();
            Ok(Alteration::Rename { column_id, title })
        }
        _ => Ok(Alteration::Unset { column_id }),
    }
}

fn build_row_action(raw: &RawRowAction, default_rel: &str) -> Option<RowAction> {
    if raw.is_empty() {
        return None;
    }
    Some(RowAction {
        base: raw.base.clone(),
        params: raw
            .params
            .iter()
            .map(|(key, value)| RowActionParam {
                key: key.clone(),
                value: ParamValue::parse(value),
            })
            .collect(),
        rel: raw
            .rel
            .clone()
            .filter(|rel| !rel.trim().is_empty())
            .unwrap_or_else(|| default_rel.to_string()),
        title: raw.title.clone().unwrap_or_default(),
    })
}
