use serde_json::Value;

use super::{format_value, payload};

/// Key answers, most specific first. The first non-null match is printed.
const PRIORITY_KEYS: [&str; 5] = [
    "monthly_payment",
    "interest_saved",
    "total_interest",
    "output",
    "labels",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result = payload(value);

    for key in PRIORITY_KEYS {
        if let Some(val) = find_key(result, key) {
            println!("{}", format_value(val));
            return;
        }
    }

    if let Some((key, val)) = result.as_object().and_then(|m| m.iter().next()) {
        println!("{}: {}", key, format_value(val));
        return;
    }

    println!("{}", format_value(result));
}

/// Depth-first search through nested objects for a non-null `key`.
fn find_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let map = value.as_object()?;
    if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
        return Some(val);
    }
    map.values().find_map(|v| find_key(v, key))
}
