use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Scalar result fields go into a Field/Value table; an embedded payment
/// schedule is rendered as its own table underneath.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                println!("{}", field_table(map));
            }
        }
        Value::Array(arr) => {
            println!("{}", array_table(arr));
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    let Value::Object(res_map) = result else {
        println!("{}", field_table(envelope));
        return;
    };

    let (records, scalars): (Vec<_>, Vec<_>) = res_map
        .iter()
        .partition(|(_, v)| matches!(v, Value::Array(a) if a.first().is_some_and(Value::is_object)));

    let scalars: Map<String, Value> = scalars
        .into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    println!("{}", field_table(&scalars));

    for (key, val) in records {
        if let Value::Array(arr) = val {
            println!("\n{}:", key);
            println!("{}", array_table(arr));
        }
    }

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

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    builder.build()
}

fn array_table(arr: &[Value]) -> String {
    let Some(Value::Object(first)) = arr.first() else {
        return arr.iter().map(format_value).collect::<Vec<_>>().join("\n");
    };

    let headers: Vec<String> = first.keys().cloned().collect();
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

    builder.build().to_string()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schedule_table_has_headers() {
        let rows = vec![
            json!({"index": 0, "payment_amount": "25314.54", "balance": "75190.48"}),
            json!({"index": 1, "payment_amount": "25314.54", "balance": "50251.89"}),
        ];
        let rendered = array_table(&rows);
        assert!(rendered.contains("payment_amount"));
        assert!(rendered.contains("50251.89"));
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(array_table(&[]), "");
    }
}
