//! Column model for listcol.
//!
//! Defines the declarative types an extension uses to describe the columns it
//! adds to a host listing, and turns them into validated descriptors:
//! - [`RawColumnSpec`] / [`InstanceSpec`]: what an extension declares
//!   (deserializable from TOML, callbacks referenced by name)
//! - [`ColumnDescriptor`]: the validated, immutable column
//! - [`ValueSource`]: attribute lookup or provider callback, decided once
//! - [`CallbackTable`]: named predicates and providers
//! - [`InlineEditPayload`]: the wire format shared by the server-side
//!   renderer and the client runtime
//!
//! Validation failures are developer mistakes and surface as [`ConfigError`].

mod callback;
mod descriptor;
mod error;
mod payload;
mod spec;
mod validate;

pub use callback::{Callback, CallbackRef, CallbackTable, ColumnProvider, VisibilityPredicate};
pub use descriptor::{
    ColumnDescriptor, FieldKind, OBJECT_ID_PLACEHOLDER, ParamValue, RowAction, RowActionParam,
    ValueSource,
};
pub use error::{ConfigError, ProviderError};
pub use payload::{DEFAULT_PAYLOAD_CLASS, InlineEditPayload};
pub use spec::{InstanceRole, InstanceSpec, RawColumnSpec, RawPopulate, RawRowAction};
pub use validate::{
    Alteration, ColumnDefaults, HostContext, ValidatedColumns, ValidationContext, validate_alteration,
    validate_column, validate_columns,
};
