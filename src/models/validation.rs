use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{ValidateEmail, ValidateUrl};

/// Per-field validation messages keyed by field path (`breakfast.0.name`).
///
/// Only the first failing rule is kept for each field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors {
    fields: IndexMap<String, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FormErrors {}

impl From<validator::ValidationErrors> for FormErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut form_errors = FormErrors::new();
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                form_errors.add(field.to_string(), message);
            }
        }
        form_errors
    }
}

/// Record `message` when the value is blank. Returns whether a value was present.
pub fn require(errors: &mut FormErrors, field: &str, value: &str, message: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, message);
        false
    } else {
        true
    }
}

/// Required, non-negative number.
pub fn require_non_negative(
    errors: &mut FormErrors,
    field: &str,
    value: Option<f64>,
    required_message: &str,
    min_message: &str,
) -> Option<f64> {
    match value {
        Some(v) if v.is_nan() => {
            errors.add(field, required_message);
            None
        }
        Some(v) if v < 0.0 => {
            errors.add(field, min_message);
            None
        }
        Some(v) => Some(v),
        None => {
            errors.add(field, required_message);
            None
        }
    }
}

/// Required, well-formed email address.
pub fn require_email(
    errors: &mut FormErrors,
    field: &str,
    value: &str,
    required_message: &str,
    invalid_message: &str,
) {
    if require(errors, field, value, required_message) && !is_valid_email(value) {
        errors.add(field, invalid_message);
    }
}

/// Required, well-formed http(s)/ftp URL.
pub fn require_url(
    errors: &mut FormErrors,
    field: &str,
    value: &str,
    required_message: &str,
    invalid_message: &str,
) {
    if require(errors, field, value, required_message) && !is_valid_url(value) {
        errors.add(field, invalid_message);
    }
}

pub fn is_valid_email(email: &str) -> bool {
    email.trim().validate_email()
}

pub fn is_valid_url(url: &str) -> bool {
    let url = url.trim();
    let lower = url.to_lowercase();
    let allowed_scheme = ["http://", "https://", "ftp://"]
        .iter()
        .any(|scheme| lower.starts_with(scheme));

    allowed_scheme && url.validate_url()
}
