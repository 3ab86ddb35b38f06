//! Edit-form population.
//!
//! After the host opens its own edit form for a row, the runtime reads the
//! payload fragments embedded in that row's cells and copies each value
//! into the like-named input. Fragments are never modified.

use crate::error::{ClientError, ClientResult};
use crate::form::EditForm;
use crate::scan::PayloadScanner;
use crate::variant::{ListingVariant, RowTrigger};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Access to the rendered markup of listing rows.
pub trait RowSource {
    /// Returns the markup inside the element with id `container_id`.
    fn row_markup(&self, container_id: &str) -> Option<String>;
}

impl RowSource for HashMap<String, String> {
    fn row_markup(&self, container_id: &str) -> Option<String> {
        self.get(container_id).cloned()
    }
}

impl RowSource for BTreeMap<String, String> {
    fn row_markup(&self, container_id: &str) -> Option<String> {
        self.get(container_id).cloned()
    }
}

#[derive(Debug)]
pub struct InlineEditRuntime<S> {
    variant: ListingVariant,
    scanner: PayloadScanner,
    source: S,
}

impl<S: RowSource> InlineEditRuntime<S> {
    pub fn new(variant: ListingVariant, payload_class: &str, source: S) -> ClientResult<Self> {
        Ok(Self {
            variant,
            scanner: PayloadScanner::new(payload_class)?,
            source,
        })
    }

    pub fn variant(&self) -> ListingVariant {
        self.variant
    }

    /// Populates `form` from the row `trigger` refers to.
    ///
    /// Returns the number of inputs set. Values for inputs the form does
    /// not have are ignored.
    pub fn open(&self, trigger: &RowTrigger, form: &mut EditForm) -> ClientResult<usize> {
        let id = self.variant.parse_id(trigger)?;

        let expected = self.variant.edit_row_id(id);
        if form.id() != expected {
            return Err(ClientError::WrongEditRow {
                expected,
                found: form.id().to_string(),
            });
        }

        let container = self.variant.row_container_id(id);
        let markup = self
            .source
            .row_markup(&container)
            .ok_or(ClientError::RowNotFound(container))?;

        let mut populated = 0;
        for payload in self.scanner.scan(&markup)? {
            for (name, value) in &payload.values {
                if form.set(name, value) {
                    populated += 1;
                } else {
                    debug!(input = %name, row = %id, "No input for payload value");
                }
            }
        }
        Ok(populated)
    }
}
