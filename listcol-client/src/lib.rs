//! Client runtime for listcol inline editing.
//!
//! Mirrors what the admin-screen script does in the browser:
//! - [`ListingVariant`]: taxonomy, post-like and comment listings, each with
//!   its own row and edit-row element ids and trigger parsing
//! - [`PayloadScanner`]: finds the JSON payload fragments embedded in a row
//! - [`InlineEditRuntime`]: copies payload values into the opened
//!   [`EditForm`]
//!
//! The runtime only reads rendered markup; saving is the host's job.

mod error;
mod form;
mod runtime;
mod scan;
mod variant;

pub use error::{ClientError, ClientResult};
pub use form::EditForm;
pub use runtime::{InlineEditRuntime, RowSource};
pub use scan::{PayloadScanner, input_names};
pub use variant::{ListingVariant, RowTrigger};
