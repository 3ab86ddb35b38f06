//! Inline-edit write-back: values submitted from a listing's edit form are
//! written to the attribute store for every authorized target.

use crate::error::HostResult;
use crate::registry::ColumnRegistry;
use crate::resolver::ValueResolver;
use listcol_types::{KindFamily, ObjectId, ObjectKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Which edit UI submitted the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavePath {
    /// Quick edit of one post-like object or taxonomy term.
    Direct,
    /// Bulk edit of several post-like objects or terms.
    Bulk,
    /// The comment reply/edit form.
    Reply,
}

impl SavePath {
    fn accepts(self, family: KindFamily) -> bool {
        match self {
            Self::Reply => family == KindFamily::Comment,
            Self::Direct | Self::Bulk => {
                matches!(family, KindFamily::PostLike | KindFamily::Taxonomy)
            }
        }
    }
}

/// A submitted edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub path: SavePath,
    pub object_kind: ObjectKind,
    pub targets: Vec<ObjectId>,
    /// Submitted inputs by name.
    pub form: BTreeMap<String, String>,
    #[serde(default)]
    pub autosave: bool,
    #[serde(default)]
    pub revision: bool,
}

impl SaveRequest {
    pub fn new(path: SavePath, object_kind: ObjectKind, targets: Vec<ObjectId>) -> Self {
        Self {
            path,
            object_kind,
            targets,
            form: BTreeMap::new(),
            autosave: false,
            revision: false,
        }
    }

    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.form.insert(name.to_string(), value.to_string());
        self
    }
}

/// Decides whether the current user may edit an object.
pub trait Authorizer: Send + Sync {
    fn can_edit(&self, kind: &ObjectKind, id: ObjectId) -> bool;
}

impl<F> Authorizer for F
where
    F: Fn(&ObjectKind, ObjectId) -> bool + Send + Sync,
{
    fn can_edit(&self, kind: &ObjectKind, id: ObjectId) -> bool {
        self(kind, id)
    }
}

/// Authorizer that allows every edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn can_edit(&self, _kind: &ObjectKind, _id: ObjectId) -> bool {
        true
    }
}

/// Counts of a processed save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub written: usize,
    pub skipped: usize,
}

pub struct InlineEditSync {
    registry: Arc<ColumnRegistry>,
    resolver: ValueResolver,
    authorizer: Arc<dyn Authorizer>,
}

impl InlineEditSync {
    pub fn new(
        registry: Arc<ColumnRegistry>,
        resolver: ValueResolver,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            registry,
            resolver,
            authorizer,
        }
    }

    /// Writes every submitted inline-editable value.
    ///
    /// Autosaves, revisions, mismatched save paths and unauthorized targets
    /// are skipped silently. Values are written as submitted, empty strings
    /// included.
    pub fn save(&self, request: &SaveRequest) -> HostResult<SaveOutcome> {
        let mut outcome = SaveOutcome::default();
        let kind = &request.object_kind;

        if request.autosave || request.revision {
            debug!(kind = %kind, autosave = request.autosave, revision = request.revision, "Save ignored");
            outcome.skipped = request.targets.len();
            return Ok(outcome);
        }
        if !request.path.accepts(kind.family()) {
            debug!(kind = %kind, path = ?request.path, "Save path does not apply to kind");
            outcome.skipped = request.targets.len();
            return Ok(outcome);
        }

        let allowed: Vec<ObjectId> = request
            .targets
            .iter()
            .copied()
            .filter(|&target| {
                let allowed = self.authorizer.can_edit(kind, target);
                if !allowed {
                    debug!(kind = %kind, object_id = %target, "Edit not authorized, skipping");
                    outcome.skipped += 1;
                }
                allowed
            })
            .collect();

        for instance in self.registry.instances_for(kind) {
            for column in instance.inline_edit_columns() {
                let Some((key, attribute_kind)) = column.attribute() else {
                    continue;
                };
                let Some(value) = request.form.get(key) else {
                    continue;
                };
                for &target in &allowed {
                    if self
                        .resolver
                        .write_attribute(kind, attribute_kind, key, target, value)?
                    {
                        outcome.written += 1;
                    } else {
                        debug!(column = %column.id(), object_id = %target, "No related object, skipping write");
                        outcome.skipped += 1;
                    }
                }
            }
        }

        if outcome.written > 0 {
            info!(
                kind = %kind,
                path = ?request.path,
                written = outcome.written,
                skipped = outcome.skipped,
                "Inline edits saved"
            );
        }
        Ok(outcome)
    }
}

impl std::fmt::Debug for InlineEditSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineEditSync")
            .field("registry", &self.registry)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
