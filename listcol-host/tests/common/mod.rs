//! Shared fixtures for listing host tests.

#![allow(dead_code)]

use listcol_host::*;
use listcol_model::{CallbackTable, ConfigError, HostContext, InstanceSpec};
use listcol_store::MemoryAttributeStore;
use listcol_types::KindCatalog;
use std::sync::Arc;

/// Everything a listing screen needs, wired over one in-memory store.
pub struct Fixture {
    pub store: Arc<MemoryAttributeStore>,
    pub registry: Arc<ColumnRegistry>,
    pub pipeline: RenderPipeline,
    pub sorter: SortRewriter,
    pub sync: InlineEditSync,
}

pub fn registry_from(
    specs: Vec<InstanceSpec>,
    callbacks: &CallbackTable,
) -> Result<ColumnRegistry, ConfigError> {
    let mut catalog = KindCatalog::default();
    catalog.register_custom("book");
    let defaults = ListingConfig::default().column_defaults();
    let host = HostContext {
        catalog: &catalog,
        callbacks,
        defaults: &defaults,
    };
    let mut registry = ColumnRegistry::new();
    for spec in specs {
        registry.register(spec, &host)?;
    }
    Ok(registry)
}

pub fn fixture(specs: Vec<InstanceSpec>) -> Fixture {
    fixture_with(specs, CallbackTable::new(), OutputFilters::new(), Arc::new(AllowAll))
}

pub fn fixture_with(
    specs: Vec<InstanceSpec>,
    callbacks: CallbackTable,
    filters: OutputFilters,
    authorizer: Arc<dyn Authorizer>,
) -> Fixture {
    let registry = Arc::new(registry_from(specs, &callbacks).expect("valid specs"));
    fixture_from_registry(registry, filters, authorizer)
}

pub fn fixture_from_registry(
    registry: Arc<ColumnRegistry>,
    filters: OutputFilters,
    authorizer: Arc<dyn Authorizer>,
) -> Fixture {
    let store = Arc::new(MemoryAttributeStore::new());
    let resolver = ValueResolver::new(store.clone(), store.clone(), filters);
    Fixture {
        pipeline: RenderPipeline::new(Arc::clone(&registry), resolver.clone(), &ListingConfig::default()),
        sorter: SortRewriter::new(Arc::clone(&registry)),
        sync: InlineEditSync::new(Arc::clone(&registry), resolver, authorizer),
        registry,
        store,
    }
}

/// `(id, id)` title pairs.
pub fn titles(ids: &[&str]) -> Vec<(String, String)> {
    ids.iter().map(|id| (id.to_string(), id.to_string())).collect()
}

pub fn ids_of(titles: &[(String, String)]) -> Vec<&str> {
    titles.iter().map(|(id, _)| id.as_str()).collect()
}
