use chrono::NaiveDate;
use thiserror::Error;

/// Date format accepted in forms and sent on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Caller-supplied input that fails a precondition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn parse_id(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    value
        .trim()
        .parse()
        .map_err(|_| ValidationError::new(field, "must be a whole number"))
}

pub(crate) fn parse_positive_int(field: &'static str, value: &str) -> Result<i32, ValidationError> {
    match value.trim().parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ValidationError::new(field, "must be a positive whole number")),
    }
}

pub(crate) fn parse_positive_number(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(ValidationError::new(field, "must be a positive number")),
    }
}

pub(crate) fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::new(field, "must be a date in YYYY-MM-DD format"))
}
