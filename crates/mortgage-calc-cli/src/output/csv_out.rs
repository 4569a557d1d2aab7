use serde_json::Value;
use std::io;

/// Write output as CSV to stdout. Values keep full precision.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Err(e) = write_csv(&mut wtr, value).and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> Result<(), csv::Error> {
    match value {
        Value::Object(map) => match (map.get("result"), map.get("results")) {
            (Some(Value::Object(result)), _) => write_pairs(wtr, result),
            (_, Some(Value::Array(rows))) => write_rows(wtr, rows),
            _ => write_pairs(wtr, map),
        },
        Value::Array(rows) => write_rows(wtr, rows),
        other => wtr.write_record([format_csv_value(other)]),
    }
}

fn write_pairs<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    map: &serde_json::Map<String, Value>,
) -> Result<(), csv::Error> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.as_str(), &format_csv_value(val)])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> Result<(), csv::Error> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([format_csv_value(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;

    for row in rows.iter().filter_map(Value::as_object) {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(format_csv_value).unwrap_or_default())
            .collect();
        wtr.write_record(&cells)?;
    }
    Ok(())
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
        write_csv(&mut wtr, value).unwrap();
        String::from_utf8(wtr.into_inner().ok().unwrap()).unwrap()
    }

    #[test]
    fn test_result_as_field_value_pairs() {
        let value = json!({
            "result": { "monthly_payment": "1703.367", "total_payments": "360" },
            "warnings": [],
        });
        assert_eq!(
            render(&value),
            "field,value\nmonthly_payment,1703.367\ntotal_payments,360\n"
        );
    }

    #[test]
    fn test_rows_use_first_row_headers() {
        let value = json!({
            "results": [
                { "field": "principal", "status": "valid", "message": null },
                { "field": "years", "status": "error", "message": "Please enter a valid number" },
            ],
            "ready": false,
        });
        assert_eq!(
            render(&value),
            "field,message,status\nprincipal,,valid\nyears,Please enter a valid number,error\n"
        );
    }
}
