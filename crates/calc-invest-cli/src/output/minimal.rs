use serde_json::Value;

use super::{display_decimal, result_of};

/// Print just the key answer value from the output.
///
/// Looks for the headline field of each command in order of priority. A
/// series prints its last point, a rate sheet one line per instrument.
pub fn print_minimal(value: &Value) {
    let result_obj = result_of(value);

    let priority_keys = ["best_instrument", "tax_rate"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some(Value::Array(points)) = map.get("points") {
            if let Some(Value::Object(last)) = points.last() {
                for (key, val) in last {
                    println!("{}: {}", key, format_minimal(val));
                }
                return;
            }
        }

        if let Some(Value::Array(quotes)) = map.get("quotes") {
            for q in quotes {
                if let (Some(name), Some(rate)) = (q.get("name"), q.get("annual_rate")) {
                    println!("{}: {}", format_minimal(name), format_minimal(rate));
                }
            }
            return;
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => display_decimal(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
