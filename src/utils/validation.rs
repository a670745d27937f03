use crate::utils::error::{ModError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"))
}

pub fn is_identifier(value: &str) -> bool {
    identifier_pattern().is_match(value)
}

/// A single symbol or alias name.
pub fn validate_identifier(value: &str) -> Result<()> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(ModError::InvalidIdentifier {
            value: value.to_string(),
        })
    }
}

/// A dotted module path such as `utilities.math_utils`.
pub fn validate_module_id(value: &str) -> Result<()> {
    if !value.is_empty() && value.split('.').all(is_identifier) {
        Ok(())
    } else {
        Err(ModError::InvalidIdentifier {
            value: value.to_string(),
        })
    }
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ModError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Expected one of: {}", allowed.join(", ")),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ModError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Range check that fails with a domain error, for validated fields.
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ModError::domain(
            field_name,
            format!("{} is outside {}..={}", value, min, max),
        ));
    }
    Ok(())
}
