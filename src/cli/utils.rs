use serde_json::Value;

use crate::cli::OutputFormat;

/// Print a JSON value as-is, or render it as text with `render`.
pub fn output<F>(output_format: OutputFormat, value: &Value, render: F) -> anyhow::Result<()>
where
    F: FnOnce(&Value),
{
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => render(value),
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(output_format: OutputFormat, what: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("[]"),
        OutputFormat::Text => println!("No {} found", what),
    }
    Ok(())
}

/// Elements of a JSON array; anything else is treated as empty.
pub fn items(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

pub fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("-")
}

pub fn int_field(value: &Value, key: &str) -> i64 {
    value.get(key).and_then(Value::as_i64).unwrap_or_default()
}

/// `skip`/`limit` pairs for list endpoints, leaving out the ones not given.
pub fn page_query(skip: Option<i64>, limit: Option<i64>) -> Vec<(&'static str, i64)> {
    [("skip", skip), ("limit", limit)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
}

/// Average formatted to two decimals, or "n/a" when there are no scores.
pub fn format_average(value: &Value) -> String {
    match value.as_f64() {
        Some(avg) => format!("{:.2}", avg),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_averages() {
        assert_eq!(format_average(&json!(5.0)), "5.00");
        assert_eq!(format_average(&json!(3.3333)), "3.33");
        assert_eq!(format_average(&Value::Null), "n/a");
    }

    #[test]
    fn reads_fields_leniently() {
        let v = json!({"id": 4, "name": "Alice"});
        assert_eq!(int_field(&v, "id"), 4);
        assert_eq!(str_field(&v, "name"), "Alice");
        assert_eq!(str_field(&v, "description"), "-");
        assert!(items(&v).is_empty());
        assert_eq!(items(&json!([1, 2])).len(), 2);
    }
}
