//! Listing configuration, read from `listing.toml`, and column declaration
//! files carrying `[[instance]]` tables.

use crate::error::{HostError, HostResult};
use crate::registry::ColumnRegistry;
use listcol_model::{
    CallbackTable, ColumnDefaults, DEFAULT_PAYLOAD_CLASS, FieldKind, HostContext, InstanceSpec,
};
use listcol_types::{KindCatalog, ObjectKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Host-wide listing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Class tagging inline-edit payload fragments.
    #[serde(default = "default_payload_class")]
    pub payload_class: String,
    /// Number of existing columns kept in front of injected ones.
    #[serde(default = "default_leading_columns")]
    pub leading_columns: usize,
    /// Kind used when a column names an unknown object kind.
    #[serde(default = "default_fallback_kind")]
    pub fallback_kind: ObjectKind,
    /// Public, non-built-in kinds the host lists.
    #[serde(default)]
    pub custom_kinds: Vec<String>,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

fn default_payload_class() -> String {
    DEFAULT_PAYLOAD_CLASS.to_string()
}

fn default_leading_columns() -> usize {
    2
}

fn default_fallback_kind() -> ObjectKind {
    ObjectKind::Post
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            payload_class: default_payload_class(),
            leading_columns: default_leading_columns(),
            fallback_kind: default_fallback_kind(),
            custom_kinds: Vec::new(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl ListingConfig {
    /// Loads settings from `path`.
    ///
    /// A missing or malformed file is not fatal: defaults are used and a
    /// warning is logged.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No listing config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => {
                    info!("Loaded listing config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse listing config {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read listing config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Builds the kind catalog: built-ins, the configured custom kinds and
    /// the fallback.
    pub fn catalog(&self) -> KindCatalog {
        let mut catalog = KindCatalog::new(self.fallback_kind.clone());
        for name in &self.custom_kinds {
            if !catalog.register_custom(name) {
                warn!(kind = %name, "Ignoring custom kind (blank, built-in or repeated)");
            }
        }
        catalog
    }

    pub fn column_defaults(&self) -> ColumnDefaults {
        self.defaults.clone().into_defaults()
    }
}

/// `[defaults]` table: values merged under every column declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub inline_edit: bool,
    #[serde(default)]
    pub field_kind: FieldKind,
    #[serde(default = "default_row_action_rel")]
    pub row_action_rel: String,
}

fn default_row_action_rel() -> String {
    ColumnDefaults::default().row_action_rel
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            sortable: false,
            inline_edit: false,
            field_kind: FieldKind::default(),
            row_action_rel: default_row_action_rel(),
        }
    }
}

impl DefaultsConfig {
    pub fn into_defaults(self) -> ColumnDefaults {
        ColumnDefaults {
            sortable: self.sortable,
            inline_editable: self.inline_edit,
            field_kind: self.field_kind,
            row_action_rel: self.row_action_rel,
        }
    }
}

/// A column declaration file.
///
/// ```toml
/// [listing]
/// leading_columns = 1
///
/// [[instance]]
/// id = "shop"
/// object_kind = "post"
///
/// [[instance.columns]]
/// id = "price"
/// title = "Price"
/// populate = { attribute_key = "price" }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnsFile {
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default, rename = "instance")]
    pub instances: Vec<InstanceSpec>,
}

impl ColumnsFile {
    /// Reads a declaration file. Unlike [`ListingConfig::load_from`], any
    /// problem is an error: columns are never silently dropped.
    pub fn load(path: impl AsRef<Path>) -> HostResult<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let contents = std::fs::read_to_string(&path)?;
        let file = toml::from_str::<Self>(&contents)
            .map_err(|source| HostError::ConfigFile { path: path.clone(), source })?;
        info!(
            instances = file.instances.len(),
            "Loaded column declarations from {:?}", path
        );
        Ok(file)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Registers every declared instance, stopping at the first invalid one.
    ///
    /// Returns the number of instances newly added to `registry`.
    pub fn register_all(
        &self,
        registry: &mut ColumnRegistry,
        callbacks: &CallbackTable,
    ) -> HostResult<usize> {
        let catalog = self.listing.catalog();
        let defaults = self.listing.column_defaults();
        let host = HostContext {
            catalog: &catalog,
            callbacks,
            defaults: &defaults,
        };

        let before = registry.len();
        for spec in &self.instances {
            registry.register(spec.clone(), &host)?;
        }
        Ok(registry.len() - before)
    }
}
