use crate::ImportError;
use serde_json::{Number, Value};

/// Trim a candidate name, returning `None` when nothing is left.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Describe a JSON value's shape for diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Render a JSON number the way a browser prints it: whole floats lose
/// their fraction (`1.0` becomes `1`, `1e3` becomes `1000`).
pub fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}

/// Parse a names document into trimmed, non-empty names.
///
/// The top level must be an array. Strings are trimmed; numbers and booleans
/// are stringified as a browser would (`1`, `2.5`, `true`). Blank entries are dropped.
/// Any `null`, nested array or object fails the whole document so callers
/// never apply half of it. Duplicates are kept; merging dedups.
///
/// # Examples
/// ```
/// use gift_picker::utils::parse_name_document;
/// assert_eq!(
///     parse_name_document(r#"[" Ada ", "", 7]"#).unwrap(),
///     vec!["Ada".to_string(), "7".to_string()]
/// );
/// assert!(parse_name_document(r#"{"names": []}"#).is_err());
/// ```
pub fn parse_name_document(text: &str) -> Result<Vec<String>, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::Malformed(e.to_string()))?;

    let entries = match value {
        Value::Array(entries) => entries,
        other => return Err(ImportError::NotAnArray(json_kind(&other))),
    };

    let mut names = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let raw = match entry {
            Value::String(s) => s.clone(),
            Value::Number(n) => number_text(n),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(ImportError::UnsupportedEntry {
                    index,
                    kind: json_kind(other),
                })
            }
        };
        if let Some(name) = normalize_name(&raw) {
            names.push(name);
        }
    }
    Ok(names)
}
