//! Column registry: one validated instance per extension instance id.
//!
//! The registry is an explicit context object. It is built once at startup
//! and then shared read-only (`Arc<ColumnRegistry>`) by the render pipeline,
//! the sort rewriter and the inline-edit sync.

use crate::hooks::{CLIENT_RUNTIME_HANDLER, HookKey, HookLedger, ListingEvent};
use listcol_model::{
    Alteration, ColumnDescriptor, ConfigError, InstanceRole, InstanceSpec, RawColumnSpec,
    HostContext, ValidatedColumns, validate_alteration, validate_columns,
};
use listcol_types::{KindFamily, ObjectKind};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// What a registered instance contributes to its listing.
#[derive(Debug, Clone)]
pub enum InstanceBody {
    Columns(ValidatedColumns),
    Alteration(Alteration),
}

/// A validated extension instance.
#[derive(Debug, Clone)]
pub struct ExtensionInstance {
    id: String,
    kind: ObjectKind,
    body: InstanceBody,
}

impl ExtensionInstance {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn body(&self) -> &InstanceBody {
        &self.body
    }

    pub fn role(&self) -> InstanceRole {
        match &self.body {
            InstanceBody::Columns(_) => InstanceRole::Columns,
            InstanceBody::Alteration(Alteration::Unset { .. }) => InstanceRole::Unset,
            InstanceBody::Alteration(Alteration::Rename { .. }) => InstanceRole::Rename,
        }
    }

    /// Added columns, in declaration order. Empty for alterations.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        match &self.body {
            InstanceBody::Columns(validated) => &validated.columns,
            InstanceBody::Alteration(_) => &[],
        }
    }

    pub fn column(&self, column_id: &str) -> Option<&ColumnDescriptor> {
        self.columns().iter().find(|column| column.id() == column_id)
    }

    pub fn alteration(&self) -> Option<&Alteration> {
        match &self.body {
            InstanceBody::Alteration(alteration) => Some(alteration),
            InstanceBody::Columns(_) => None,
        }
    }

    pub fn needs_inline_edit(&self) -> bool {
        matches!(&self.body, InstanceBody::Columns(validated) if validated.needs_inline_edit)
    }

    /// Inline-editable columns, in declaration order.
    pub fn inline_edit_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns().iter().filter(|column| column.inline_editable())
    }

    /// Lists the listing events this instance must be subscribed to.
    pub fn subscriptions(&self) -> Vec<HookKey> {
        let kind = &self.kind;
        let handler = |operation: &str| format!("{}.{operation}", self.id);

        if self.alteration().is_some() {
            return vec![HookKey::new(
                ListingEvent::ColumnTitles(kind.clone()),
                handler("titles"),
                10,
                1,
            )];
        }

        let family = kind.family();
        let cell_arity = if family == KindFamily::Taxonomy { 3 } else { 2 };
        let mut keys = vec![
            HookKey::new(ListingEvent::ColumnTitles(kind.clone()), handler("titles"), 10, 1),
            HookKey::new(ListingEvent::CellContent(kind.clone()), handler("cell"), 10, cell_arity),
            HookKey::new(
                ListingEvent::SortableColumns(kind.clone()),
                handler("sortable_ids"),
                10,
                1,
            ),
        ];

        if self.needs_inline_edit() {
            keys.push(HookKey::new(
                ListingEvent::ClientScripts,
                CLIENT_RUNTIME_HANDLER,
                8,
                1,
            ));
            match family {
                KindFamily::Comment => {
                    keys.push(HookKey::new(
                        ListingEvent::CommentReplyForm,
                        handler("comment_reply_fields"),
                        10,
                        2,
                    ));
                    keys.push(HookKey::new(ListingEvent::SaveComment, handler("save"), 10, 1));
                }
                KindFamily::Taxonomy => {
                    keys.push(HookKey::new(
                        ListingEvent::QuickEditBox,
                        handler("quick_edit_fields"),
                        15,
                        2,
                    ));
                    keys.push(HookKey::new(
                        ListingEvent::BulkEditBox,
                        handler("bulk_edit_fields"),
                        15,
                        2,
                    ));
                    keys.push(HookKey::new(
                        ListingEvent::SaveTerm(kind.clone()),
                        handler("save"),
                        10,
                        2,
                    ));
                }
                KindFamily::PostLike => {
                    keys.push(HookKey::new(
                        ListingEvent::QuickEditBox,
                        handler("quick_edit_fields"),
                        15,
                        2,
                    ));
                    keys.push(HookKey::new(
                        ListingEvent::BulkEditBox,
                        handler("bulk_edit_fields"),
                        15,
                        2,
                    ));
                    keys.push(HookKey::new(ListingEvent::SavePost, handler("save"), 10, 2));
                }
                KindFamily::User => {}
            }
        }

        keys.push(HookKey::new(ListingEvent::SortQuery, handler("sort"), 10, 1));
        keys
    }
}

/// Registered instances keyed by id, in registration order.
#[derive(Debug, Default)]
pub struct ColumnRegistry {
    instances: Vec<Arc<ExtensionInstance>>,
    index: HashMap<String, usize>,
}

impl ColumnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ================================================================
    // Registration
    // ================================================================

    /// Validates and registers an instance.
    ///
    /// Registering an id that already exists returns the existing instance
    /// unchanged; the new spec is not validated.
    ///
    /// `host` supplies the catalog, callbacks and column defaults.
    pub fn register(
        &mut self,
        spec: InstanceSpec,
        host: &HostContext<'_>,
    ) -> Result<Arc<ExtensionInstance>, ConfigError> {
        let id = spec.id.trim().to_string();
        if id.is_empty() {
            return Err(ConfigError::MissingInstanceId);
        }
        if let Some(existing) = self.get(&id) {
            debug!(instance = %id, "Instance already registered, returning existing");
            return Ok(existing);
        }

        let kind: ObjectKind = spec
            .object_kind
            .parse()
            .map_err(|_| ConfigError::MissingObjectKind { instance: id.clone() })?;

        let body = match spec.effective_role() {
            InstanceRole::Columns => {
                let ctx = host.for_instance(&id, &kind);
                InstanceBody::Columns(validate_columns(&spec.columns, &ctx)?)
            }
            InstanceRole::Unset | InstanceRole::Rename => {
                InstanceBody::Alteration(validate_alteration(&spec)?)
            }
        };

        Ok(self.insert(ExtensionInstance { id, kind, body }))
    }

    /// Removes `column_id` from the `kind` listing.
    pub fn unset(
        &mut self,
        kind: ObjectKind,
        column_id: &str,
    ) -> Result<Arc<ExtensionInstance>, ConfigError> {
        let spec = alteration_spec(InstanceRole::Unset, &kind, column_id, None);
        self.register_alteration(spec, kind)
    }

    /// Relabels `column_id` in the `kind` listing. The title is used verbatim.
    pub fn rename(
        &mut self,
        kind: ObjectKind,
        column_id: &str,
        title: &str,
    ) -> Result<Arc<ExtensionInstance>, ConfigError> {
        let spec = alteration_spec(InstanceRole::Rename, &kind, column_id, Some(title));
        self.register_alteration(spec, kind)
    }

    fn register_alteration(
        &mut self,
        spec: InstanceSpec,
        kind: ObjectKind,
    ) -> Result<Arc<ExtensionInstance>, ConfigError> {
        if let Some(existing) = self.get(&spec.id) {
            return Ok(existing);
        }
        let alteration = validate_alteration(&spec)?;
        Ok(self.insert(ExtensionInstance {
            id: spec.id,
            kind,
            body: InstanceBody::Alteration(alteration),
        }))
    }

    fn insert(&mut self, instance: ExtensionInstance) -> Arc<ExtensionInstance> {
        info!(
            instance = %instance.id,
            kind = %instance.kind,
            role = ?instance.role(),
            columns = instance.columns().len(),
            "Column instance registered"
        );
        let instance = Arc::new(instance);
        self.index.insert(instance.id.clone(), self.instances.len());
        self.instances.push(Arc::clone(&instance));
        instance
    }

    // ================================================================
    // Queries
    // ================================================================

    pub fn get(&self, id: &str) -> Option<Arc<ExtensionInstance>> {
        self.index
            .get(id.trim())
            .map(|&position| Arc::clone(&self.instances[position]))
    }

    /// All instances in registration order.
    pub fn instances(&self) -> impl Iterator<Item = &Arc<ExtensionInstance>> {
        self.instances.iter()
    }

    /// Instances registered for `kind`, in registration order.
    pub fn instances_for<'a>(
        &'a self,
        kind: &'a ObjectKind,
    ) -> impl Iterator<Item = &'a Arc<ExtensionInstance>> + 'a {
        self.instances.iter().filter(move |instance| &instance.kind == kind)
    }

    /// Every added column of `kind` with its owning instance, in
    /// registration then declaration order.
    pub fn columns_for<'a>(
        &'a self,
        kind: &'a ObjectKind,
    ) -> impl Iterator<Item = (&'a ExtensionInstance, &'a ColumnDescriptor)> + 'a {
        self.instances_for(kind).flat_map(|instance| {
            instance
                .columns()
                .iter()
                .map(move |column| (&**instance, column))
        })
    }

    /// First column of `kind` with `column_id`.
    pub fn column(&self, kind: &ObjectKind, column_id: &str) -> Option<&ColumnDescriptor> {
        self.instances
            .iter()
            .filter(|instance| &instance.kind == kind)
            .find_map(|instance| instance.column(column_id))
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    // ================================================================
    // Activation
    // ================================================================

    /// Attaches every instance's subscriptions to `ledger`.
    ///
    /// Returns only the subscriptions that were newly attached; running
    /// activation twice attaches nothing the second time.
    pub fn activate(&self, ledger: &mut HookLedger) -> Vec<HookKey> {
        let mut attached = Vec::new();
        for instance in &self.instances {
            for key in instance.subscriptions() {
                if ledger.once(key.clone()) {
                    debug!(instance = %instance.id, hook = %key.event, "Subscription attached");
                    attached.push(key);
                }
            }
        }
        if !attached.is_empty() {
            info!(count = attached.len(), "Listing subscriptions attached");
        }
        attached
    }
}

fn alteration_spec(
    role: InstanceRole,
    kind: &ObjectKind,
    column_id: &str,
    title: Option<&str>,
) -> InstanceSpec {
    let prefix = match role {
        InstanceRole::Rename => "rename",
        _ => "unset",
    };
    let mut spec = InstanceSpec::new(&format!("{prefix}:{kind}:{}", column_id.trim()), kind.as_str());
    spec.role = Some(role);
    spec.columns.push(RawColumnSpec {
        id: Some(column_id.to_string()),
        title: title.map(str::to_string),
        ..Default::default()
    });
    spec
}
