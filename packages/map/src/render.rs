//! HTML rendering of a composed [`MapView`].
//!
//! The page is a fixed Leaflet template. The view model is embedded as a
//! JSON `<script>` block and a small bootstrap script turns it into
//! Leaflet layers and controls. Popup and legend text is inserted with
//! `textContent`, so feed strings are never interpreted as markup.

use quake_map_map_models::MapView;

use crate::MapError;

const TEMPLATE: &str = include_str!("../assets/index.html");
const TITLE_PLACEHOLDER: &str = "{{TITLE}}";
const VIEW_PLACEHOLDER: &str = "{{MAP_VIEW_JSON}}";

/// Renders the full HTML page for `view`.
///
/// Each placeholder is filled exactly once, in template order, so text
/// that happens to look like a placeholder is never substituted again.
///
/// # Errors
///
/// Returns [`MapError::Json`] if the view cannot be serialized, or
/// [`MapError::Template`] if the page template lacks a placeholder.
pub fn render_page(view: &MapView) -> Result<String, MapError> {
    let json = embeddable_json(view)?;

    let (head, rest) = split_at_placeholder(TEMPLATE, TITLE_PLACEHOLDER)?;
    let (middle, tail) = split_at_placeholder(rest, VIEW_PLACEHOLDER)?;
    let title = escape_html(&view.title);

    let mut page =
        String::with_capacity(head.len() + title.len() + middle.len() + json.len() + tail.len());
    page.push_str(head);
    page.push_str(&title);
    page.push_str(middle);
    page.push_str(&json);
    page.push_str(tail);

    Ok(page)
}

fn split_at_placeholder<'a>(
    template: &'a str,
    placeholder: &str,
) -> Result<(&'a str, &'a str), MapError> {
    template
        .split_once(placeholder)
        .ok_or_else(|| MapError::Template {
            message: format!("missing {placeholder}"),
        })
}

/// Serializes the view so it can sit inside a `<script>` element.
///
/// Every `<` is written as `\u003c`, which keeps `</script>` and `<!--`
/// out of the block while still decoding to the same JSON string.
fn embeddable_json(view: &MapView) -> Result<String, MapError> {
    Ok(serde_json::to_string(view)?.replace('<', "\\u003c"))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
