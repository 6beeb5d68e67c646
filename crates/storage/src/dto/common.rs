use crate::models::WeightClass;

/// Validator hook for fields holding a weight class name
pub fn validate_weight_class(value: &str) -> Result<(), validator::ValidationError> {
    if value.parse::<WeightClass>().is_ok() {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("invalid_weight_class");
        error.message = Some(
            format!(
                "Weight class must be one of: {}",
                WeightClass::ALL.map(|wc| wc.as_str()).join(", ")
            )
            .into(),
        );
        Err(error)
    }
}

/// Store weight classes under their canonical name regardless of how the client spelled them
pub fn canonical_weight_class(value: &str) -> String {
    value
        .parse::<WeightClass>()
        .map(|wc| wc.as_str().to_string())
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_weight_class() {
        assert!(validate_weight_class("lightweight").is_ok());
        assert!(validate_weight_class("Light Heavyweight").is_ok());

        let err = validate_weight_class("catchweight").unwrap_err();
        assert_eq!(err.code, "invalid_weight_class");
        assert!(err.message.unwrap().contains("heavyweight"));
    }

    #[test]
    fn test_canonical_weight_class() {
        assert_eq!(canonical_weight_class("Light Heavyweight"), "light_heavyweight");
        assert_eq!(canonical_weight_class("unknown"), "unknown");
    }
}
