use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let prefs = ui::prefs();
    let options = table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    };

    let rendered = match serde_json::to_value(value)? {
        Value::Array(items) if items.is_empty() => String::from("(no entries)"),
        Value::Array(items) => {
            let headers = collect_headers(&items);
            let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
            let rows = items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => headers
                        .iter()
                        .map(|header| map.get(header).map_or_else(|| "-".to_string(), cell))
                        .collect(),
                    other => vec![cell(other)],
                })
                .collect::<Vec<Vec<String>>>();
            table::render_table(&header_refs, &rows, options)
        }
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            table::render_table(&["field", "value"], &rows, options)
        }
        scalar => table::render_table(&["value"], &[vec![cell(&scalar)]], options),
    };
    Ok(rendered)
}

/// Object keys in first-seen order across all rows.
fn collect_headers(items: &[Value]) -> Vec<String> {
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        headers.push("value".to_string());
    }
    headers
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}
