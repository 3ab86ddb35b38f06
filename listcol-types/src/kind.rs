//! Object kinds and kind validation.
//!
//! A kind is either one of the built-in listing kinds or a custom kind the
//! host registered as public. Validation never fails: unknown names degrade
//! to the catalog's fallback kind.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Category of row being listed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ObjectKind {
    Post,
    Comment,
    Category,
    PostTag,
    User,
    /// A host-defined kind, e.g. a custom post type such as `book`.
    Custom(String),
}

const BUILTIN_KINDS: &[ObjectKind] = &[
    ObjectKind::Post,
    ObjectKind::Comment,
    ObjectKind::Category,
    ObjectKind::PostTag,
    ObjectKind::User,
];

impl ObjectKind {
    /// Returns the canonical name used in hook names and store keys.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
            Self::Category => "category",
            Self::PostTag => "post_tag",
            Self::User => "user",
            Self::Custom(name) => name,
        }
    }

    /// Returns the built-in kinds.
    pub fn builtins() -> &'static [ObjectKind] {
        BUILTIN_KINDS
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Groups the kind by the listing screen that displays it.
    pub fn family(&self) -> KindFamily {
        match self {
            Self::Comment => KindFamily::Comment,
            Self::Category | Self::PostTag => KindFamily::Taxonomy,
            Self::User => KindFamily::User,
            Self::Post | Self::Custom(_) => KindFamily::PostLike,
        }
    }
}

impl FromStr for ObjectKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(crate::Error::EmptyObjectKind);
        }
        Ok(match name {
            "post" => Self::Post,
            "comment" => Self::Comment,
            "category" => Self::Category,
            "post_tag" => Self::PostTag,
            "user" => Self::User,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl TryFrom<String> for ObjectKind {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ObjectKind> for String {
    fn from(kind: ObjectKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing screen family; each family has its own hooks and inline-edit UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindFamily {
    PostLike,
    Taxonomy,
    Comment,
    User,
}

/// Set of object kinds the host accepts, with a fallback for unknown names.
#[derive(Debug, Clone)]
pub struct KindCatalog {
    custom: BTreeSet<String>,
    fallback: ObjectKind,
}

impl Default for KindCatalog {
    fn default() -> Self {
        Self::new(ObjectKind::Post)
    }
}

impl KindCatalog {
    /// Creates a catalog with only built-in kinds and the given fallback.
    pub fn new(fallback: ObjectKind) -> Self {
        Self {
            custom: BTreeSet::new(),
            fallback,
        }
    }

    /// Registers a public custom kind. Built-in and blank names are refused.
    ///
    /// Returns true if the kind was newly added.
    pub fn register_custom(&mut self, name: &str) -> bool {
        match name.parse::<ObjectKind>() {
            Ok(ObjectKind::Custom(name)) => self.custom.insert(name),
            _ => false,
        }
    }

    /// Returns the fallback kind used for unknown names.
    pub fn fallback(&self) -> &ObjectKind {
        &self.fallback
    }

    /// Returns registered custom kind names in sorted order.
    pub fn custom_kinds(&self) -> impl Iterator<Item = &str> {
        self.custom.iter().map(String::as_str)
    }

    /// Returns true if `kind` is built-in or a registered custom kind.
    pub fn is_known(&self, kind: &ObjectKind) -> bool {
        match kind {
            ObjectKind::Custom(name) => self.custom.contains(name),
            _ => true,
        }
    }

    /// Validates a candidate kind name.
    ///
    /// Known kinds are returned as-is; anything else (including blank input)
    /// degrades to the fallback kind.
    pub fn validate(&self, candidate: &str) -> ObjectKind {
        match candidate.parse::<ObjectKind>() {
            Ok(kind) if self.is_known(&kind) => kind,
            _ => {
                warn!(
                    candidate = %candidate,
                    fallback = %self.fallback,
                    "Unknown object kind, using fallback"
                );
                self.fallback.clone()
            }
        }
    }
}
