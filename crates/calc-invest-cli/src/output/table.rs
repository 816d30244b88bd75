use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::display_decimal;

/// Format output as tables using the tabled crate.
///
/// Scalar result fields go in one Field/Value table. Every list (ranking,
/// details, series points, quotes, brackets) and every nested object gets a
/// titled table of its own.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                print_result_tables(result);
                print_envelope_notes(map);
            } else {
                print_field_table(map);
            }
        }
        Value::Array(arr) => print_array_table(arr, None),
        _ => println!("{}", value),
    }
}

fn print_result_tables(result: &Map<String, Value>) {
    let scalars: Map<String, Value> = result
        .iter()
        .filter(|(_, v)| !v.is_array() && !v.is_object())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if !scalars.is_empty() {
        print_field_table(&scalars);
    }

    for (key, val) in result {
        match val {
            Value::Array(arr) if arr.iter().all(Value::is_object) => {
                println!("\n{}:", title(key));
                print_array_table(arr, first_column(key));
            }
            Value::Array(arr) => {
                let items: Vec<String> = arr.iter().map(format_value).collect();
                println!("\n{}: {}", title(key), items.join(", "));
            }
            Value::Object(obj) => {
                println!("\n{}:", title(key));
                print_field_table(obj);
            }
            _ => {}
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_table(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value], lead: Option<&str>) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", format_value(item));
        }
        return;
    };

    let headers = ordered_headers(first, lead);
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

/// Column order for a list: the lead column (month, rank, name) first, the
/// rest in key order.
pub(crate) fn ordered_headers(first: &Map<String, Value>, lead: Option<&str>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::with_capacity(first.len());
    if let Some(lead) = lead.filter(|l| first.contains_key(*l)) {
        headers.push(lead.to_string());
    }
    headers.extend(
        first
            .keys()
            .filter(|k| Some(k.as_str()) != lead)
            .cloned(),
    );
    headers
}

/// Which column identifies the rows of a named list.
pub(crate) fn first_column(list_key: &str) -> Option<&'static str> {
    match list_key {
        "points" => Some("month"),
        "ranking" => Some("rank"),
        "details" | "quotes" => Some("name"),
        "brackets" => Some("min_months"),
        _ => None,
    }
}

fn title(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => display_decimal(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
