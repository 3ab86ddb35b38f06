//! listcol preview
//!
//! Renders one admin listing the way the host would: declared columns are
//! injected into the existing titles, the requested ordering is rewritten
//! to the backing attribute, and every row's cells are printed.
//!
//! Usage:
//!   listcol-preview --columns columns.toml --attributes snapshot.json \
//!       --kind post --ids 1,2,3 --orderby price --order desc

use anyhow::{Context, Result};
use clap::Parser;
use listcol_host::{
    ColumnRegistry, ColumnsFile, HookLedger, ListingConfig, ListingQuery, OutputFilters,
    RenderPipeline, SortRewriter, ValueResolver, execute_order,
};
use listcol_model::CallbackTable;
use listcol_store::{MemoryAttributeStore, SortDirection};
use listcol_types::{ObjectId, ObjectKind};
use std::{fs, path::PathBuf, sync::Arc};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "listcol-preview")]
#[command(about = "Render a listing with derived columns")]
struct Args {
    /// Column declaration file (`[[instance]]` tables)
    #[arg(short, long)]
    columns: PathBuf,

    /// Listing settings; overrides the `[listing]` table of the columns file
    #[arg(short, long)]
    listing: Option<PathBuf>,

    /// JSON attribute snapshot
    #[arg(short, long)]
    attributes: Option<PathBuf>,

    /// Object kind being listed
    #[arg(short, long, default_value = "post")]
    kind: String,

    /// Row ids, in listing order
    #[arg(long, value_delimiter = ',')]
    ids: Vec<u64>,

    /// Columns the listing already has
    #[arg(long, value_delimiter = ',', default_value = "cb,title,date")]
    existing: Vec<String>,

    /// Column to order by
    #[arg(long)]
    orderby: Option<String>,

    /// asc or desc
    #[arg(long, default_value = "asc")]
    order: String,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// A rendered listing: column titles and one cell per column per row.
#[derive(Debug, PartialEq)]
struct Listing {
    titles: Vec<(String, String)>,
    rows: Vec<(ObjectId, Vec<String>)>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut file = ColumnsFile::load(&args.columns)
        .with_context(|| format!("Failed to load column declarations from {:?}", args.columns))?;
    if let Some(path) = &args.listing {
        file.listing = ListingConfig::load_from(path);
    }

    let store = match &args.attributes {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read attribute snapshot {:?}", path))?;
            MemoryAttributeStore::from_json(&json).context("Invalid attribute snapshot")?
        }
        None => MemoryAttributeStore::new(),
    };

    let kind: ObjectKind = args.kind.parse().context("Invalid object kind")?;
    let ids: Vec<ObjectId> = args.ids.iter().copied().map(ObjectId::new).collect();
    let query = match &args.orderby {
        Some(column) => ListingQuery::ordered_by(kind, column, SortDirection::parse_lenient(&args.order)),
        None => ListingQuery {
            kind,
            main: true,
            orderby: None,
            order: SortDirection::Asc,
        },
    };

    let listing = render(&file, Arc::new(store), query, &ids, &args.existing)?;
    print!("{}", format_listing(&listing));
    Ok(())
}

/// Registers `file`'s instances and renders the listing `query` describes.
fn render(
    file: &ColumnsFile,
    store: Arc<MemoryAttributeStore>,
    mut query: ListingQuery,
    ids: &[ObjectId],
    existing: &[String],
) -> Result<Listing> {
    let mut registry = ColumnRegistry::new();
    let registered = file.register_all(&mut registry, &CallbackTable::new())?;
    let registry = Arc::new(registry);

    let mut ledger = HookLedger::new();
    let attached = registry.activate(&mut ledger);
    info!(instances = registered, subscriptions = attached.len(), "Listing prepared");

    let resolver = ValueResolver::new(store.clone(), store.clone(), OutputFilters::new());
    let pipeline = RenderPipeline::new(Arc::clone(&registry), resolver, &file.listing);

    let existing: Vec<(String, String)> = existing
        .iter()
        .map(|id| (id.clone(), id.clone()))
        .collect();
    let titles = pipeline.titles(&query.kind, &existing);

    if SortRewriter::new(Arc::clone(&registry)).rewrite(&mut query) {
        debug!(orderby = ?query.orderby, "Ordering by attribute");
    }
    let ordered = execute_order(&store, &query, ids);

    let rows = ordered
        .into_iter()
        .map(|id| {
            let cells = titles
                .iter()
                .map(|(column, _)| pipeline.cell(&query.kind, column, id).unwrap_or_default())
                .collect();
            (id, cells)
        })
        .collect();

    Ok(Listing { titles, rows })
}

fn format_listing(listing: &Listing) -> String {
    let mut out = String::from("id");
    for (_, title) in &listing.titles {
        out.push('\t');
        out.push_str(title);
    }
    out.push('\n');
    for (id, cells) in &listing.rows {
        out.push_str(&id.to_string());
        for cell in cells {
            out.push('\t');
            out.push_str(cell);
        }
        out.push('\n');
    }
    out
}
