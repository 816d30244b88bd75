use serde_json::{Map, Value};
use std::io;

use super::result_of;
use super::table::{first_column, ordered_headers};

/// Lists worth exporting, in order of preference.
const PRIMARY_LISTS: [&str; 5] = ["points", "details", "ranking", "quotes", "brackets"];

/// Write output as CSV to stdout.
///
/// Results carrying a list (series points, comparison details, quotes,
/// brackets) export that list one row per item. Anything else becomes a
/// two-column field/value sheet.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_of(value) {
        Value::Object(result) => match primary_list(result) {
            Some((key, rows)) => write_array_csv(&mut wtr, rows, first_column(key)),
            None => {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in result {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        },
        Value::Array(arr) => write_array_csv(&mut wtr, arr, None),
        other => {
            let _ = wtr.write_record([&format_csv_value(other)]);
        }
    }

    let _ = wtr.flush();
}

fn primary_list(result: &Map<String, Value>) -> Option<(&'static str, &[Value])> {
    PRIMARY_LISTS.iter().find_map(|key| match result.get(*key) {
        Some(Value::Array(rows)) => Some((*key, rows.as_slice())),
        _ => None,
    })
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value], lead: Option<&str>) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers = ordered_headers(first, lead);
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

/// Full precision: CSV is for further processing, not display.
fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_series_points_preferred_over_names() {
        let result = json!({
            "basis": "net",
            "instruments": ["CDB"],
            "points": [{"month": 0, "CDB": "1000"}],
        });
        let (key, rows) = primary_list(result.as_object().unwrap()).unwrap();
        assert_eq!(key, "points");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_rows_written_with_lead_column() {
        let rows = vec![
            json!({"CDB": "1000", "month": 0}),
            json!({"CDB": "1057.45", "month": 1}),
        ];
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_array_csv(&mut wtr, &rows, Some("month"));
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert_eq!(text, "month,CDB\n0,1000\n1,1057.45\n");
    }
}
