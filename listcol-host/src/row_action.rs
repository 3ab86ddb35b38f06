//! Row-action and form markup helpers.

use listcol_model::RowAction;
use listcol_types::ObjectId;

/// Builds a percent-encoded query string, keeping parameter order.
pub fn build_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Renders the hover link for one row.
pub fn render_row_action(action: &RowAction, object_id: ObjectId) -> String {
    let query = build_query(&action.resolved_params(object_id));
    let href = if query.is_empty() {
        action.base.clone()
    } else {
        format!("{}?{query}", action.base)
    };
    let title = escape_html(&action.title);
    format!(
        "<div class=\"row-actions\"><span class=\"view\"><a href=\"{}\" title=\"{title}\" rel=\"{}\">{title}</a></span></div>",
        escape_html(&href),
        escape_html(&action.rel),
    )
}

/// Escapes text for use inside an HTML attribute or element.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
