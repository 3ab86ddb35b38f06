use crate::callback::{Callback, ColumnProvider, VisibilityPredicate};
use listcol_types::{ObjectId, ObjectKind};
use serde::{Deserialize, Serialize};

/// Row-action parameter value that stands for the current row's object id.
pub const OBJECT_ID_PLACEHOLDER: &str = "#object_id#";

/// Validated, immutable specification of one column.
///
/// Only [`crate::validate_column`] constructs descriptors.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) sortable: bool,
    pub(crate) visibility: Option<Callback<dyn VisibilityPredicate>>,
    pub(crate) value_source: ValueSource,
    pub(crate) row_action: Option<RowAction>,
    pub(crate) inline_editable: bool,
    pub(crate) field_kind: FieldKind,
}

impl ColumnDescriptor {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sortable(&self) -> bool {
        self.sortable
    }

    pub fn visibility(&self) -> Option<&Callback<dyn VisibilityPredicate>> {
        self.visibility.as_ref()
    }

    pub fn value_source(&self) -> &ValueSource {
        &self.value_source
    }

    pub fn row_action(&self) -> Option<&RowAction> {
        self.row_action.as_ref()
    }

    pub fn inline_editable(&self) -> bool {
        self.inline_editable
    }

    pub fn field_kind(&self) -> &FieldKind {
        &self.field_kind
    }

    /// Returns `(key, kind)` for attribute-sourced columns.
    pub fn attribute(&self) -> Option<(&str, &ObjectKind)> {
        match &self.value_source {
            ValueSource::Attribute { key, kind } => Some((key.as_str(), kind)),
            ValueSource::Provider(_) => None,
        }
    }

    /// Evaluates the visibility predicate; columns without one are always shown.
    pub fn is_visible(&self, object_id: ObjectId) -> bool {
        self.visibility
            .as_ref()
            .is_none_or(|predicate| predicate.get().is_visible(object_id))
    }
}

/// Where a column's value comes from. Decided once, at validation.
#[derive(Debug, Clone)]
pub enum ValueSource {
    /// Read `key` from the attribute store for objects of `kind`.
    Attribute { key: String, kind: ObjectKind },
    /// Ask a caller-supplied provider.
    Provider(Callback<dyn ColumnProvider>),
}

/// Hover link rendered under a cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub base: String,
    pub params: Vec<RowActionParam>,
    pub rel: String,
    pub title: String,
}

impl RowAction {
    /// Returns the parameters with the placeholder replaced by `object_id`.
    pub fn resolved_params(&self, object_id: ObjectId) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|param| {
                let value = match &param.value {
                    ParamValue::Literal(value) => value.clone(),
                    ParamValue::CurrentObjectId => object_id.to_string(),
                };
                (param.key.clone(), value)
            })
            .collect()
    }
}

/// One ordered query parameter of a row action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowActionParam {
    pub key: String,
    pub value: ParamValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Literal(String),
    CurrentObjectId,
}

impl ParamValue {
    pub fn parse(raw: &str) -> Self {
        if raw == OBJECT_ID_PLACEHOLDER {
            Self::CurrentObjectId
        } else {
            Self::Literal(raw.to_string())
        }
    }
}

/// Input type used when a column is edited inline.
///
/// Declarations name any HTML input type; the common ones get their own
/// variant and everything else passes through as [`FieldKind::Custom`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Email,
    Url,
    Tel,
    Date,
    Color,
    Password,
    /// Any other input type, lowercased, e.g. `time` or `range`.
    Custom(String),
}

impl FieldKind {
    /// Returns the HTML input `type` attribute value.
    pub fn input_type(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Url => "url",
            Self::Tel => "tel",
            Self::Date => "date",
            Self::Color => "color",
            Self::Password => "password",
            Self::Custom(input) => input,
        }
    }
}

impl From<String> for FieldKind {
    fn from(raw: String) -> Self {
        let input = raw.trim().to_ascii_lowercase();
        match input.as_str() {
            "" | "text" => Self::Text,
            "number" => Self::Number,
            "email" => Self::Email,
            "url" => Self::Url,
            "tel" => Self::Tel,
            "date" => Self::Date,
            "color" => Self::Color,
            "password" => Self::Password,
            _ => Self::Custom(input),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.input_type().to_string()
    }
}
