//! Structural validators
//!
//! Predicates over opaque JSON documents. They never fail; a malformed input is
//! simply `false`.

use serde_json::Value;

use super::units::Measurement;

/// A scalar value is either `{"magnitude": <number>, "unit": <string>}` (the
/// server also sends `value` for the number), a string such as `"210mm"`, or
/// a bare finite number.
pub fn is_valid_measurement(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_some_and(f64::is_finite),
        Value::String(s) => Measurement::parse(s).is_ok_and(|m| m.is_finite()),
        Value::Object(map) => {
            let magnitude_ok = map
                .get("magnitude")
                .or_else(|| map.get("value"))
                .and_then(Value::as_f64)
                .is_some_and(f64::is_finite);
            let unit_ok = map
                .get("unit")
                .and_then(Value::as_str)
                .is_some_and(|u| !u.trim().is_empty());
            magnitude_ok && unit_ok
        }
        _ => false,
    }
}

/// True when the product has both `width` and `height` as valid scalar values.
pub fn validate_product_dimensions(product: &Value) -> bool {
    ["width", "height"]
        .iter()
        .all(|key| product.get(key).is_some_and(is_valid_measurement))
}

/// True when the stock has a non-empty `name` and every grade has one too.
pub fn validate_stock(stock: &Value) -> bool {
    let named = |v: &Value| {
        v.get("name")
            .and_then(Value::as_str)
            .is_some_and(|n| !n.trim().is_empty())
    };
    if !named(stock) {
        return false;
    }
    match stock.get("grades") {
        None | Some(Value::Null) => true,
        Some(Value::Array(grades)) => grades.iter().all(named),
        Some(_) => false,
    }
}

/// Identifiers used as path segments: non-empty, no surrounding whitespace,
/// no `/` and no control characters.
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && id.trim() == id
        && !id.contains('/')
        && !id.chars().any(char::is_control)
}

/// A positive whole quantity.
pub fn is_valid_quantity(value: &Value) -> bool {
    value.as_u64().is_some_and(|n| n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_needs_both_dimensions() {
        assert!(!validate_product_dimensions(&json!({
            "name": "card",
            "width": {"value": 85, "unit": "mm"}
        })));
        assert!(validate_product_dimensions(&json!({
            "width": {"value": 85, "unit": "mm"},
            "height": {"value": 55, "unit": "mm"}
        })));
        assert!(validate_product_dimensions(&json!({
            "width": {"magnitude": 85, "unit": "mm"},
            "height": {"magnitude": 55.5, "unit": "mm"}
        })));
        assert!(!validate_product_dimensions(&json!({
            "width": {"magnitude": "85", "unit": "mm"},
            "height": {"magnitude": 55, "unit": "mm"}
        })));
        assert!(validate_product_dimensions(&json!({"width": "8.5in", "height": 11})));
        assert!(!validate_product_dimensions(&json!({"width": "wide", "height": 11})));
        assert!(!validate_product_dimensions(&json!("not an object")));
    }

    #[test]
    fn measurement_shapes() {
        assert!(is_valid_measurement(&json!({"value": 1.5, "unit": "in"})));
        assert!(!is_valid_measurement(&json!({"value": "1.5", "unit": "in"})));
        assert!(!is_valid_measurement(&json!({"value": 1.5, "unit": ""})));
        assert!(!is_valid_measurement(&json!({"value": 1.5})));
        assert!(!is_valid_measurement(&Value::Null));
    }

    #[test]
    fn stock_and_identifier_checks() {
        assert!(validate_stock(&json!({"name": "Gloss", "grades": [{"name": "150gsm"}]})));
        assert!(!validate_stock(&json!({"name": "Gloss", "grades": [{}]})));
        assert!(!validate_stock(&json!({"name": " "})));
        assert!(is_valid_identifier("job-42"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("a/b"));
        assert!(!is_valid_identifier(" padded"));
        assert!(is_valid_quantity(&json!(10)));
        assert!(!is_valid_quantity(&json!(0)));
        assert!(!is_valid_quantity(&json!(-1)));
        assert!(!is_valid_quantity(&json!(2.5)));
    }
}
