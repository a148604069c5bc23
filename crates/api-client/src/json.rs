//! Lenient readers for loosely typed JSON fields.
//!
//! Both services are Python backends that are not strict about numbers
//! versus numeric strings, so every reader accepts either and maps
//! anything else to `None`.

use serde_json::Value;

/// Non-blank string, or the textual form of a number
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn float(value: &Value) -> Option<f64> {
    let float = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    float.filter(|f| f.is_finite())
}

/// Positive whole year; `2018`, `2018.0` and `"2018"` all qualify
pub(crate) fn year(value: &Value) -> Option<i32> {
    let year = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i),
            None => n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64),
        },
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    i32::try_from(year).ok().filter(|y| *y > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text() {
        assert_eq!(text(&json!("Clos du Pic")), Some("Clos du Pic".to_string()));
        assert_eq!(text(&json!("  ")), None);
        assert_eq!(text(&json!(12)), Some("12".to_string()));
        assert_eq!(text(&json!(null)), None);
        assert_eq!(text(&json!(["a"])), None);
    }

    #[test]
    fn test_float() {
        assert_eq!(float(&json!(0.135)), Some(0.135));
        assert_eq!(float(&json!("0.14")), Some(0.14));
        assert_eq!(float(&json!(92)), Some(92.0));
        assert_eq!(float(&json!("n/a")), None);
        assert_eq!(float(&json!(true)), None);
    }

    #[test]
    fn test_year() {
        assert_eq!(year(&json!(2018)), Some(2018));
        assert_eq!(year(&json!(2018.0)), Some(2018));
        assert_eq!(year(&json!(" 2018 ")), Some(2018));
        assert_eq!(year(&json!(2018.5)), None);
        assert_eq!(year(&json!(0)), None);
        assert_eq!(year(&json!("NV")), None);
    }
}
