//! Payload field extraction and coercion.
//!
//! Request payloads arrive either as JSON objects or as multipart form
//! text fields (always strings). Extraction walks a resource's field
//! specs, coerces each raw value to its column type, applies defaults,
//! and enforces required fields, producing the ordered value list the
//! generic repository binds into its generated SQL.

use chrono::NaiveDate;
use sanstha_core::error::CoreError;
use serde_json::Value;

use crate::registry::{FieldKind, FieldSpec, Resource};

/// A coerced value ready to bind. `None` binds SQL NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Int(Option<i64>),
    Date(Option<NaiveDate>),
}

/// Extract and coerce all of a resource's writable fields from a payload.
///
/// Coercion rules:
/// - absent keys, JSON `null`, and blank strings count as missing;
/// - missing + `default` configured applies the default;
/// - missing + `required` is a validation error;
/// - `Int` accepts JSON numbers and numeric strings (form fields arrive
///   as text);
/// - `Date` accepts `YYYY-MM-DD` strings.
pub fn extract_values(
    resource: &Resource,
    payload: &serde_json::Map<String, Value>,
) -> Result<Vec<FieldValue>, CoreError> {
    resource
        .fields
        .iter()
        .map(|spec| extract_one(spec, payload.get(spec.field)))
        .collect()
}

fn extract_one(spec: &FieldSpec, raw: Option<&Value>) -> Result<FieldValue, CoreError> {
    let raw = match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(other) => Some(other),
    };

    let effective = match raw {
        Some(value) => Some(coerce(spec, value)?),
        None => match spec.default {
            Some(default) => Some(coerce(spec, &Value::String(default.to_string()))?),
            None => None,
        },
    };

    match effective {
        Some(value) => Ok(value),
        None if spec.required => Err(CoreError::Validation(format!("{} is required", spec.field))),
        None => Ok(empty(spec.kind)),
    }
}

fn coerce(spec: &FieldSpec, value: &Value) -> Result<FieldValue, CoreError> {
    match spec.kind {
        FieldKind::Text => match value {
            Value::String(s) => Ok(FieldValue::Text(Some(s.clone()))),
            other => Err(CoreError::Validation(format!(
                "{} must be a string, got {other}",
                spec.field
            ))),
        },
        FieldKind::Int => match value {
            Value::Number(n) => n
                .as_i64()
                .map(|i| FieldValue::Int(Some(i)))
                .ok_or_else(|| CoreError::Validation(format!("{} must be an integer", spec.field))),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(|i| FieldValue::Int(Some(i)))
                .map_err(|_| CoreError::Validation(format!("{} must be an integer", spec.field))),
            other => Err(CoreError::Validation(format!(
                "{} must be an integer, got {other}",
                spec.field
            ))),
        },
        FieldKind::Date => match value {
            Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(|d| FieldValue::Date(Some(d)))
                .map_err(|_| {
                    CoreError::Validation(format!("{} must be a date (YYYY-MM-DD)", spec.field))
                }),
            other => Err(CoreError::Validation(format!(
                "{} must be a date string, got {other}",
                spec.field
            ))),
        },
    }
}

fn empty(kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Text => FieldValue::Text(None),
        FieldKind::Int => FieldValue::Int(None),
        FieldKind::Date => FieldValue::Date(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{EVENTS, GALLERY, HERO, INITIATIVES, MESSAGES, NEWS};
    use serde_json::json;

    fn payload(value: Value) -> serde_json::Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn text_fields_pass_through() {
        let values = extract_values(
            &MESSAGES,
            &payload(json!({
                "name": "Asha",
                "email": "asha@example.org",
                "message": "Namaste"
            })),
        )
        .unwrap();
        assert_eq!(values[0], FieldValue::Text(Some("Asha".into())));
        // phone is optional and defaults to NULL
        assert_eq!(values[2], FieldValue::Text(None));
    }

    #[test]
    fn missing_required_field_is_a_validation_error() {
        let err = extract_values(
            &MESSAGES,
            &payload(json!({"email": "a@b.c", "message": "hi"})),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg == "name is required"));
    }

    #[test]
    fn blank_string_counts_as_missing_for_required_fields() {
        let err = extract_values(
            &MESSAGES,
            &payload(json!({"name": "  ", "email": "a@b.c", "message": "hi"})),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg == "name is required"));
    }

    #[test]
    fn news_category_defaults_to_general() {
        let values = extract_values(&NEWS, &payload(json!({"titleEn": "X"}))).unwrap();
        assert_eq!(values[4], FieldValue::Text(Some("General".into())));
    }

    #[test]
    fn gallery_title_defaults_to_untitled() {
        let values = extract_values(&GALLERY, &payload(json!({}))).unwrap();
        assert_eq!(values[0], FieldValue::Text(Some("Untitled".into())));
    }

    #[test]
    fn int_accepts_json_number_and_numeric_string() {
        let from_number = extract_values(&HERO, &payload(json!({"display_order": 3}))).unwrap();
        let from_string = extract_values(&HERO, &payload(json!({"display_order": "3"}))).unwrap();
        assert_eq!(from_number[1], FieldValue::Int(Some(3)));
        assert_eq!(from_string[1], FieldValue::Int(Some(3)));
    }

    #[test]
    fn initiative_display_order_defaults_to_zero() {
        let values = extract_values(&INITIATIVES, &payload(json!({}))).unwrap();
        assert_eq!(values[5], FieldValue::Int(Some(0)));
    }

    #[test]
    fn hero_display_order_has_no_default() {
        let values = extract_values(&HERO, &payload(json!({}))).unwrap();
        assert_eq!(values[1], FieldValue::Int(None));
    }

    #[test]
    fn bad_int_is_a_validation_error() {
        let err = extract_values(&HERO, &payload(json!({"display_order": "first"}))).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("display_order")));
    }

    #[test]
    fn event_date_parses_iso_format() {
        let values = extract_values(&EVENTS, &payload(json!({"date": "2025-01-26"}))).unwrap();
        let expected = NaiveDate::from_ymd_opt(2025, 1, 26).unwrap();
        assert_eq!(values[2], FieldValue::Date(Some(expected)));
    }

    #[test]
    fn bad_date_is_a_validation_error() {
        let err = extract_values(&EVENTS, &payload(json!({"date": "26/01/2025"}))).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("date")));
    }

    #[test]
    fn non_string_text_is_rejected() {
        let err = extract_values(&NEWS, &payload(json!({"titleEn": 42}))).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("titleEn")));
    }
}
