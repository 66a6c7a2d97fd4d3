use serde_json::Value;
use std::io;
use tabled::{builder::Builder, Table};

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => print_table(value),
        OutputFormat::Csv => print_csv(value),
        OutputFormat::Minimal => print_minimal(value),
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Render the result envelope: scalar fields as a field/value table, each
/// array-of-objects field (projection years, scenario rows) as its own table.
fn print_table(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            let mut row_sections: Vec<(&str, &Vec<Value>)> = Vec::new();

            for (key, val) in map {
                match val {
                    Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
                        row_sections.push((key.as_str(), rows));
                    }
                    Value::Object(nested) => {
                        for (nested_key, nested_val) in nested {
                            builder.push_record([
                                format!("{key}.{nested_key}"),
                                scalar_to_string(nested_val),
                            ]);
                        }
                    }
                    _ => {
                        builder.push_record([key.to_string(), scalar_to_string(val)]);
                    }
                }
            }

            let table = Table::from(builder);
            println!("{}", table);

            for (key, rows) in row_sections {
                println!("\n{}:", key);
                print_rows_table(rows);
            }
        }
        Value::Array(rows) => print_rows_table(rows),
        other => println!("{}", other),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = value.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_rows_table(rows: &[Value]) {
    let headers = match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect::<Vec<_>>(),
        _ => return,
    };

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h).map(scalar_to_string).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }
    println!("{}", Table::from(builder));
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Write the first array-of-objects field in the result as CSV rows, or fall
/// back to field,value pairs for scalar outputs.
fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            let rows = map.values().find_map(|v| match v {
                Value::Array(rows) if rows.first().is_some_and(Value::is_object) => Some(rows),
                _ => None,
            });

            if let Some(rows) = rows {
                write_rows_csv(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &scalar_to_string(val)]);
                }
            }
        }
        Value::Array(rows) => write_rows_csv(&mut wtr, rows),
        other => {
            let _ = wtr.write_record([&scalar_to_string(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let headers = match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect::<Vec<_>>(),
        _ => return,
    };

    let _ = wtr.write_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h).map(scalar_to_string).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}

// ---------------------------------------------------------------------------
// Minimal
// ---------------------------------------------------------------------------

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in priority order, one level deep,
/// then falls back to the first scalar field.
fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "grade",
        "monthly_payment",
        "final_roi_percent",
        "best_by_cash_flow",
        "cap_rate_percent",
        "monthly_cash_flow",
    ];

    if let Value::Object(map) = result {
        for key in &priority_keys {
            if let Some(val) = lookup(map, key) {
                if !val.is_null() {
                    println!("{}", scalar_to_string(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().find(|(_, v)| !v.is_object() && !v.is_array()) {
            println!("{}: {}", key, scalar_to_string(val));
            return;
        }
    }

    println!("{}", scalar_to_string(result));
}

fn lookup<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(val) = map.get(key) {
        return Some(val);
    }
    map.values().find_map(|child| match child {
        Value::Object(nested) => nested.get(key),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
