use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::currency;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", value);
        return;
    };

    if let Some(result) = map.get("result") {
        print_computation(result, map);
    } else if let Some(Value::Array(rows)) = map.get("results") {
        print_rows(rows);
        print_scalars(map);
    } else {
        print_pairs(map);
    }
}

fn print_computation(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(fields) => print_pairs(fields),
        other => println!("{}", format_value("", other)),
    }

    if let Some(Value::Object(inputs)) = envelope.get("assumptions") {
        println!("\nInputs:");
        print_pairs(inputs);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_pairs(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(key, val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for row in rows.iter().filter_map(Value::as_object) {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(h).map(|v| format_value(h, v)).unwrap_or_default())
            .collect();
        builder.push_record(cells);
    }

    println!("{}", Table::from(builder));
}

/// Top-level flags printed beneath a row table (e.g. `ready`).
fn print_scalars(map: &Map<String, Value>) {
    for (key, val) in map {
        if !val.is_array() && !val.is_object() {
            println!("{}: {}", key, format_value(key, val));
        }
    }
}

fn format_value(key: &str, value: &Value) -> String {
    if let Some(display) = currency::format_field(key, value) {
        return display;
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| format_value("", v))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
