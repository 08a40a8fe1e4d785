//! Field checks shared by the entity constructors.

use crate::errors::ModelError;

pub fn required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} cannot be more than {max} characters")));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), ModelError> {
    let valid = match value.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

/// Emails are stored trimmed and lower-cased so lookups are case-insensitive.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn price(value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::Validation("price cannot be negative".into()));
    }
    Ok(())
}
