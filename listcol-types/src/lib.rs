//! Core type definitions for listcol.
//!
//! This crate defines the listing-agnostic vocabulary shared by every other
//! crate in the workspace:
//! - [`ObjectId`]: numeric identifier of one listed row
//! - [`ObjectKind`]: the category of row being listed (post, comment, ...)
//! - [`KindCatalog`]: validation of object-kind names against the built-in
//!   set plus host-registered custom kinds
//!
//! Nothing here knows about columns, stores or rendering.

mod ids;
mod kind;

pub use ids::ObjectId;
pub use kind::{KindCatalog, KindFamily, ObjectKind};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("object kind must not be empty")]
    EmptyObjectKind,
}
