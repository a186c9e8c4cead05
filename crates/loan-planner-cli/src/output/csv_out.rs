use serde_json::Value;
use std::io;

use super::{flatten, format_value, payload};

/// Write output as CSV to stdout.
///
/// A payload holding a list of records (such as schedule rows) is written
/// one record per line; anything else becomes two-column `field,value`.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let flat = flatten(payload(value));

    if let Some((_, rows)) = flat.tables.first() {
        write_records(&mut wtr, rows);
    } else {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in &flat.fields {
            let _ = wtr.write_record([key.as_str(), val.as_str()]);
        }
    }

    let _ = wtr.flush();
}

fn write_records<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
