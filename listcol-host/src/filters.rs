//! Per-column output filters applied to resolved values before display.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type Filter = Arc<dyn Fn(String) -> String + Send + Sync>;

/// Filter chains keyed by column id. Filters run in the order they were
/// added; the raw value kept for inline editing is never filtered.
#[derive(Clone, Default)]
pub struct OutputFilters {
    chains: HashMap<String, Vec<Filter>>,
}

impl OutputFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F>(&mut self, column_id: impl Into<String>, filter: F)
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.chains
            .entry(column_id.into())
            .or_default()
            .push(Arc::new(filter));
    }

    /// Runs the chain for `column_id`; columns without filters pass through.
    pub fn apply(&self, column_id: &str, value: String) -> String {
        match self.chains.get(column_id) {
            Some(chain) => chain.iter().fold(value, |value, filter| filter(value)),
            None => value,
        }
    }

    pub fn has_filters(&self, column_id: &str) -> bool {
        self.chains.get(column_id).is_some_and(|chain| !chain.is_empty())
    }
}

impl fmt::Debug for OutputFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut columns: Vec<(&String, usize)> = self
            .chains
            .iter()
            .map(|(column, chain)| (column, chain.len()))
            .collect();
        columns.sort();
        f.debug_struct("OutputFilters").field("chains", &columns).finish()
    }
}
