use serde_json::Value;

/// Print just the headline number from the output.
///
/// For the Monte Carlo valuation that is the mean; for scenario output the
/// expected-case valuation.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in ["mean", "valuation"] {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some(Value::Array(scenarios)) = map.get("scenarios") {
            let expected = scenarios
                .iter()
                .find(|s| s.get("name").and_then(Value::as_str) == Some("expected"));
            if let Some(val) = expected.and_then(|s| s.get("valuation")) {
                println!("{}", format_minimal(val));
                return;
            }
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
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
