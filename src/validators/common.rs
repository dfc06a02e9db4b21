//! Common validation utilities and helpers.

use validator::ValidationErrors;

use crate::errors::ApiError;

/// Convert validator errors to ApiError::ValidationError.
///
/// # Example
/// ```ignore
/// body.validate().map_err(validation_errors_to_api_error)?;
/// ```
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let errors: Vec<String> = e
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| {
            errs.iter()
                .map(|e| e.message.clone().unwrap_or_default().to_string())
        })
        .collect();
    ApiError::ValidationError(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Identifier is required"))]
        identifier: String,
    }

    #[test]
    fn test_messages_are_collected() {
        let probe = Probe {
            identifier: String::new(),
        };
        let err = validation_errors_to_api_error(probe.validate().unwrap_err());
        match err {
            ApiError::ValidationError(messages) => {
                assert_eq!(messages, vec!["Identifier is required"]);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
