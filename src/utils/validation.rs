use crate::utils::error::{FareError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FareError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FareError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(FareError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number not less than 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FareError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // 以 !(a <= b) 判斷，讓 NaN 也落在範圍外
    if !(min <= value && value <= max) {
        return Err(FareError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.path", "./prefs.json").is_ok());
        assert!(validate_path("storage.path", "").is_err());
        assert!(validate_path("storage.path", "a\0b").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("baseFare", 0.0).is_ok());
        assert!(validate_non_negative("baseFare", 22.5).is_ok());
        assert!(validate_non_negative("baseFare", -0.01).is_err());
        assert!(validate_non_negative("baseFare", f64::NAN).is_err());
        assert!(validate_non_negative("baseFare", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("discount", 0.9, 0.01, 1.0).is_ok());
        assert!(validate_range("discount", 0.01, 0.01, 1.0).is_ok());
        assert!(validate_range("discount", 1.0, 0.01, 1.0).is_ok());
        assert!(validate_range("discount", 0.0, 0.01, 1.0).is_err());
        assert!(validate_range("discount", 1.5, 0.01, 1.0).is_err());
        assert!(validate_range("discount", f64::NAN, 0.01, 1.0).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "白天").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }
}
