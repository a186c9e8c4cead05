pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Decimal places shown for money in human-facing formats.
const DISPLAY_DP: u32 = 2;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The computation payload: the `result` field of an envelope, or the value itself.
fn payload(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// A payload split into scalar fields (dotted paths) and tables of records.
#[derive(Default)]
struct Flattened {
    fields: Vec<(String, String)>,
    tables: Vec<(String, Vec<Value>)>,
}

fn flatten(value: &Value) -> Flattened {
    let mut out = Flattened::default();
    walk("", value, &mut out);
    out
}

fn walk(prefix: &str, value: &Value, out: &mut Flattened) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                walk(&path, val, out);
            }
        }
        Value::Array(items) if items.first().is_some_and(Value::is_object) => {
            out.tables.push((prefix.to_string(), items.clone()));
        }
        _ => out.fields.push((prefix.to_string(), format_value(value))),
    }
}

/// Render a scalar for display. Decimal strings are rounded to cents;
/// JSON output is left at full precision.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => round_decimal(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

fn round_decimal(s: &str) -> String {
    match Decimal::from_str(s) {
        Ok(d) if d.scale() > DISPLAY_DP => d.round_dp(DISPLAY_DP).to_string(),
        _ => s.to_string(),
    }
}
