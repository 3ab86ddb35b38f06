//! Listing host for listcol.
//!
//! Wires validated column instances into a host listing UI:
//! - [`ColumnRegistry`]: validated instances by id, in registration order
//! - [`HookLedger`]: one-time subscription of instances to [`ListingEvent`]s
//! - [`ValueResolver`]: per-row values from the store or a provider
//! - [`RenderPipeline`]: titles, cells, row actions, inline-edit payloads
//! - [`SortRewriter`]: ordering by a column becomes ordering by its attribute
//! - [`InlineEditSync`]: writes submitted edits back to the store
//!
//! Configuration errors surface at registration; everything after that
//! degrades (empty values, skipped writes) instead of failing.

mod config;
mod error;
mod filters;
mod hooks;
mod inline_edit;
mod registry;
mod render;
mod resolver;
mod row_action;
mod sort;

pub use config::{ColumnsFile, DefaultsConfig, ListingConfig};
pub use error::{HostError, HostResult};
pub use filters::OutputFilters;
pub use hooks::{CLIENT_RUNTIME_HANDLER, HookKey, HookLedger, ListingEvent};
pub use inline_edit::{AllowAll, Authorizer, InlineEditSync, SaveOutcome, SavePath, SaveRequest};
pub use registry::{ColumnRegistry, ExtensionInstance, InstanceBody};
pub use render::{ColumnTitles, RenderPipeline};
pub use resolver::{Resolved, ValueResolver};
pub use row_action::{build_query, escape_html, render_row_action};
pub use sort::{ListingQuery, OrderBy, SortPolicy, SortRewriter, execute_order};
