use axum::extract::Multipart;
use serde_json::{Map, Number, Value};
use storage::dto::application::ResumeUpload;

use crate::error::WebError;

/// Multipart text fields arrive as strings; these are the ones the
/// application DTOs expect as other JSON types.
const NUMERIC_FIELDS: &[&str] = &["age", "gradYear", "applicationYear"];
const BOOLEAN_FIELDS: &[&str] = &["sleep"];

const RESUME_FIELD: &str = "resume";

pub struct ApplicationForm {
    pub fields: Map<String, Value>,
    pub resume: Option<ResumeUpload>,
}

/// Drain a multipart body into coerced JSON fields plus the optional
/// resume part.
pub async fn read_form(mut multipart: Multipart) -> Result<ApplicationForm, WebError> {
    let mut fields = Map::new();
    let mut resume = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == RESUME_FIELD {
            let file_name = field.file_name().unwrap_or("resume").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| WebError::BadRequest(format!("Could not read resume: {e}")))?
                .to_vec();
            resume = Some(ResumeUpload {
                file_name,
                content_type,
                data,
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| WebError::BadRequest(format!("Could not read field {name}: {e}")))?;
            if let Some(value) = coerce(&name, text) {
                fields.insert(name, value);
            }
        }
    }

    Ok(ApplicationForm { fields, resume })
}

pub fn decode<T: serde::de::DeserializeOwned>(fields: Map<String, Value>) -> Result<T, WebError> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| WebError::BadRequest(format!("Malformed application fields: {e}")))
}

/// Empty optional inputs are dropped rather than stored as empty strings.
fn coerce(name: &str, raw: String) -> Option<Value> {
    if raw.is_empty() {
        return None;
    }
    if NUMERIC_FIELDS.contains(&name) {
        if let Ok(number) = raw.parse::<i64>() {
            return Some(Value::Number(Number::from(number)));
        }
    }
    if BOOLEAN_FIELDS.contains(&name) {
        if let Ok(flag) = raw.parse::<bool>() {
            return Some(Value::Bool(flag));
        }
    }
    Some(Value::String(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fields_become_numbers() {
        assert_eq!(coerce("age", "21".to_string()), Some(Value::from(21)));
        assert_eq!(
            coerce("applicationYear", "2026".to_string()),
            Some(Value::from(2026))
        );
    }

    #[test]
    fn boolean_fields_become_booleans() {
        assert_eq!(coerce("sleep", "true".to_string()), Some(Value::Bool(true)));
        assert_eq!(coerce("sleep", "false".to_string()), Some(Value::Bool(false)));
    }

    #[test]
    fn text_fields_stay_strings_even_when_numeric() {
        assert_eq!(
            coerce("phoneNumber", "5551234567".to_string()),
            Some(Value::String("5551234567".to_string()))
        );
    }

    #[test]
    fn empty_values_are_dropped() {
        assert_eq!(coerce("major", String::new()), None);
    }

    #[test]
    fn unparseable_typed_fields_fall_back_to_strings_for_the_validator() {
        // Deserialization then reports the type mismatch as a 400.
        assert_eq!(
            coerce("age", "twenty".to_string()),
            Some(Value::String("twenty".to_string()))
        );
    }
}
