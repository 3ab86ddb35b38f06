//! Locating inline-edit payload fragments and form inputs in rendered markup.

use crate::error::ClientResult;
use listcol_model::InlineEditPayload;
use regex::Regex;
use tracing::debug;

/// Finds payload fragments tagged with one class.
#[derive(Debug, Clone)]
pub struct PayloadScanner {
    pattern: Regex,
}

impl PayloadScanner {
    pub fn new(payload_class: &str) -> ClientResult<Self> {
        let pattern = Regex::new(&format!(
            r#"(?s)<script type="application/json" class="{}" data-row="(\d+)">(.*?)</script>"#,
            regex::escape(payload_class)
        ))?;
        Ok(Self { pattern })
    }

    /// Parses every fragment in `markup`, in document order.
    ///
    /// A fragment whose `data-row` disagrees with its body is still
    /// returned; the body is authoritative.
    pub fn scan(&self, markup: &str) -> ClientResult<Vec<InlineEditPayload>> {
        let mut payloads = Vec::new();
        for captures in self.pattern.captures_iter(markup) {
            let payload = InlineEditPayload::from_json(&captures[2])?;
            if payload.row.to_string() != captures[1] {
                debug!(attribute = &captures[1], row = %payload.row, "Payload row attribute mismatch");
            }
            payloads.push(payload);
        }
        Ok(payloads)
    }
}

/// Returns the `name` attribute of every `<input>` in `markup`, in order.
pub fn input_names(markup: &str) -> ClientResult<Vec<String>> {
    let pattern = Regex::new(r#"<input\b[^>]*?\bname="([^"]*)""#)?;
    Ok(pattern
        .captures_iter(markup)
        .map(|captures| unescape_html(&captures[1]))
        .collect())
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
