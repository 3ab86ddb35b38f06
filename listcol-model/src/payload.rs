//! Inline-edit wire payload.
//!
//! The server embeds the raw (unfiltered) values of a row's inline-editable
//! columns as a JSON fragment inside the rendered row; the client runtime
//! reads these fragments back when the row's edit form opens. The fragment
//! is a `<script type="application/json">` element tagged with a class so
//! the browser never renders it.

use listcol_types::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Class tagging payload fragments unless the host configures another one.
pub const DEFAULT_PAYLOAD_CLASS: &str = "listcol-inline";

/// Raw values of one row, keyed by attribute key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineEditPayload {
    pub row: ObjectId,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl InlineEditPayload {
    pub fn new(row: ObjectId) -> Self {
        Self {
            row,
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Adds `other`'s values; later fragments win on key collisions.
    pub fn merge(&mut self, other: InlineEditPayload) {
        self.values.extend(other.values);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Renders the payload as a hidden fragment tagged with `class`.
    ///
    /// `</` is written as `<\/` so a value can never close the script
    /// element early; JSON parsers read both forms identically.
    pub fn to_fragment(&self, class: &str) -> serde_json::Result<String> {
        let json = self.to_json()?.replace("</", "<\\/");
        Ok(format!(
            "<script type=\"application/json\" class=\"{class}\" data-row=\"{}\">{json}</script>",
            self.row
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_escapes_closing_tags() {
        let payload = InlineEditPayload::new(ObjectId::new(5)).with_value("note", "a</script>b");
        let fragment = payload.to_fragment(DEFAULT_PAYLOAD_CLASS).unwrap();
        assert_eq!(fragment.matches("</script>").count(), 1);
        assert!(fragment.starts_with(
            "<script type=\"application/json\" class=\"listcol-inline\" data-row=\"5\">"
        ));
    }

    #[test]
    fn escaped_json_still_parses() {
        let payload = InlineEditPayload::new(ObjectId::new(5)).with_value("note", "a</b>");
        let escaped = payload.to_json().unwrap().replace("</", "<\\/");
        assert_eq!(InlineEditPayload::from_json(&escaped).unwrap(), payload);
    }

    #[test]
    fn merge_later_wins() {
        let mut first = InlineEditPayload::new(ObjectId::new(1)).with_value("a", "1");
        first.merge(
            InlineEditPayload::new(ObjectId::new(1))
                .with_value("a", "2")
                .with_value("b", "3"),
        );
        assert_eq!(first.values.get("a").map(String::as_str), Some("2"));
        assert_eq!(first.values.len(), 2);
    }
}
