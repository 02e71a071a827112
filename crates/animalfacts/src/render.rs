//! HTML rendering for fetched records
//!
//! Each record becomes one card; the cards replace [`PLACEHOLDER`] in the
//! template. Records are opaque, so every field is shown generically.

use crate::error::RenderError;
use crate::types::AnimalRecord;
use serde_json::Value;

/// Marker in the template that receives the rendered cards
pub const PLACEHOLDER: &str = "__REPLACE_ANIMALS_INFO__";

/// Field used as the card title
const TITLE_FIELD: &str = "name";

/// Built-in page template
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>My Animal Repository</title>
  <style>
    body { font-family: sans-serif; background: #f5f5f0; margin: 0; padding: 2em; }
    h1 { text-align: center; }
    .cards { list-style: none; padding: 0; max-width: 40em; margin: 0 auto; }
    .cards__item { background: #fff; border-radius: 8px; box-shadow: 0 1px 4px rgba(0,0,0,.15); margin: 1em 0; padding: 1em 1.5em; }
    .card__title { font-size: 1.4em; font-weight: bold; margin-bottom: .5em; }
    .card__text { margin: 0; line-height: 1.6; }
  </style>
</head>
<body>
  <h1>My Animal Repository</h1>
  <ul class="cards">
__REPLACE_ANIMALS_INFO__
  </ul>
</body>
</html>
"#;

/// Render records into the template
///
/// Cards keep input order. An empty slice renders a single notice card.
pub fn render_html(records: &[AnimalRecord], template: &str) -> Result<String, RenderError> {
    if !template.contains(PLACEHOLDER) {
        return Err(RenderError::MissingPlaceholder(PLACEHOLDER));
    }
    Ok(template.replace(PLACEHOLDER, &render_cards(records)))
}

/// Render only the card list
pub fn render_cards(records: &[AnimalRecord]) -> String {
    if records.is_empty() {
        return "    <li class=\"cards__item\">\n      <div class=\"card__title\">No animals found</div>\n    </li>\n"
            .to_string();
    }

    let mut output = String::new();
    for record in records {
        output.push_str(&render_card(record));
    }
    output
}

fn render_card(record: &AnimalRecord) -> String {
    let mut output = String::from("    <li class=\"cards__item\">\n");

    if let Some(Value::String(title)) = record.get(TITLE_FIELD) {
        output.push_str(&format!(
            "      <div class=\"card__title\">{}</div>\n",
            escape_html(title)
        ));
    }

    let mut lines = Vec::new();
    for (key, value) in record {
        if key == TITLE_FIELD && value.is_string() {
            continue;
        }
        match value {
            Value::Null => {}
            // One level of nesting, e.g. "characteristics": {"diet": ...}
            Value::Object(inner) => {
                for (inner_key, inner_value) in inner {
                    if let Some(text) = display_value(inner_value) {
                        lines.push(field_line(inner_key, &text));
                    }
                }
            }
            other => {
                if let Some(text) = display_value(other) {
                    lines.push(field_line(key, &text));
                }
            }
        }
    }

    if !lines.is_empty() {
        output.push_str("      <p class=\"card__text\">\n");
        output.push_str(&lines.join("<br/>\n"));
        output.push_str("\n      </p>\n");
    }

    output.push_str("    </li>\n");
    output
}

fn field_line(key: &str, text: &str) -> String {
    format!(
        "        <strong>{}:</strong> {}",
        escape_html(&humanize(key)),
        escape_html(text)
    )
}

/// Plain-text form of a value, or None if there is nothing to show
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(display_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        Value::Object(_) => Some(value.to_string()),
    }
}

/// `top_speed` -> `Top speed`
fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Escape text for inclusion in HTML content and attributes
pub fn escape_html(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(c),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> AnimalRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("top_speed"), "Top speed");
        assert_eq!(humanize("diet"), "Diet");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_render_card_fields() {
        let html = render_cards(&[record(json!({
            "name": "Red Fox",
            "locations": ["Asia", "Europe"],
            "characteristics": {"diet": "Omnivore", "top_speed": "50 km/h", "lifespan": null},
            "taxonomy": null
        }))]);

        assert!(html.contains("<div class=\"card__title\">Red Fox</div>"));
        assert!(html.contains("<strong>Locations:</strong> Asia, Europe"));
        assert!(html.contains("<strong>Diet:</strong> Omnivore"));
        assert!(html.contains("<strong>Top speed:</strong> 50 km/h"));
        assert!(!html.contains("Lifespan"));
        assert!(!html.contains("Taxonomy"));
    }

    #[test]
    fn test_render_escapes_values() {
        let html = render_cards(&[record(json!({"name": "<script>", "diet": "a & b"}))]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_preserves_order() {
        let html = render_html(
            &[
                record(json!({"name": "Zebra"})),
                record(json!({"name": "Aardvark"})),
            ],
            DEFAULT_TEMPLATE,
        )
        .unwrap();

        let zebra = html.find("Zebra").unwrap();
        let aardvark = html.find("Aardvark").unwrap();
        assert!(zebra < aardvark);
        assert!(!html.contains(PLACEHOLDER));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_render_empty() {
        let html = render_html(&[], "<ul>__REPLACE_ANIMALS_INFO__</ul>").unwrap();
        assert!(html.contains("No animals found"));
    }

    #[test]
    fn test_missing_placeholder() {
        assert_eq!(
            render_html(&[], "<html></html>"),
            Err(RenderError::MissingPlaceholder(PLACEHOLDER))
        );
    }

    #[test]
    fn test_record_without_name() {
        let html = render_cards(&[record(json!({"name": 7, "diet": "Herbivore"}))]);
        assert!(!html.contains("card__title"));
        assert!(html.contains("<strong>Name:</strong> 7"));
        assert!(html.contains("<strong>Diet:</strong> Herbivore"));
    }
}
