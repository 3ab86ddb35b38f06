//! Error types for the column model.

use thiserror::Error;

/// Registration-time configuration errors. All are fatal for the instance
/// being registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("instance id is required")]
    MissingInstanceId,

    #[error("instance '{instance}' requires an object kind")]
    MissingObjectKind { instance: String },

    #[error("column #{index} of instance '{instance}' requires an id")]
    MissingId { instance: String, index: usize },

    #[error("column '{column}' requires a title")]
    MissingTitle { column: String },

    #[error("column '{column}': visibility predicate '{name}' is not callable")]
    UncallableVisibilityPredicate { column: String, name: String },

    #[error("column '{column}' requires either an attribute key or a provider")]
    MissingValueSource { column: String },

    #[error("column '{column}' requires either an attribute key or a provider, not both")]
    AmbiguousValueSource { column: String },

    #[error("column '{column}': provider '{name}' is not callable")]
    UncallableProvider { column: String, name: String },

    #[error("column '{column}' is inline-editable but has no attribute key")]
    InlineEditRequiresAttribute { column: String },

    #[error("column id '{column}' is declared more than once")]
    DuplicateColumnId { column: String },

    #[error("alteration '{instance}' requires a target column id")]
    MissingAlterationTarget { instance: String },

    #[error("alteration '{instance}' must carry exactly one column, found {count}")]
    AlterationColumnCount { instance: String, count: usize },

    #[error("rename of column '{column}' requires a new title")]
    MissingRenameTitle { column: String },
}

/// Failure reported by a column provider. Never propagated past the cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provider failed: {0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
