use serde_json::Value;
use std::io::{self, Write};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    write_csv(&mut wtr, value);
    let _ = wtr.flush();
}

/// Schedules become one row per payment; a result object holding a
/// schedule is written as that schedule; other objects as field/value pairs.
fn write_csv<W: Write>(wtr: &mut csv::Writer<W>, value: &Value) {
    match value {
        Value::Object(map) => {
            let result = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            if let Some(Value::Array(records)) = result.get("schedule") {
                write_array_csv(wtr, records);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in result {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => {
            write_array_csv(wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }
}

fn write_array_csv<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

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

    fn render(value: &Value) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_csv(&mut wtr, value);
        match wtr.into_inner() {
            Ok(buf) => String::from_utf8(buf).unwrap(),
            Err(_) => panic!("csv writer failed to flush"),
        }
    }

    #[test]
    fn test_schedule_rows() {
        let v = json!([
            {"index": 0, "balance": "75190.48"},
            {"index": 1, "balance": "50251.89"}
        ]);
        let out = render(&v);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "index,balance");
        assert_eq!(lines[2], "1,50251.89");
    }

    #[test]
    fn test_analysis_writes_schedule() {
        let v = json!({"result": {"monthly_payment": "1005", "schedule": [{"index": 0, "balance": "0"}]}});
        assert_eq!(render(&v), "index,balance\n0,0\n");
    }

    #[test]
    fn test_payment_field_value() {
        let v = json!({"result": {"monthly_payment": "1933.28"}});
        assert_eq!(render(&v), "field,value\nmonthly_payment,1933.28\n");
    }
}
