//! Payload validation helpers.
//!
//! Request DTOs derive [`validator::Validate`]; this module turns the
//! resulting errors into [`FieldError`] lists and holds the rules that a
//! derive attribute cannot express.

use validator::{Validate, ValidationErrors};

use crate::error::{CoreError, FieldError};

/// Accepted actor gender categories (stored lowercase).
pub const VALID_GENDERS: &[&str] = &["male", "female", "other"];

/// Convert `validator` output into a sorted field error list.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| format!("{field} is invalid ({})", e.code));
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::InvalidFields(field_errors(&errors))
    }
}

/// Run derive-based validation, mapping failures to [`CoreError::InvalidFields`].
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), CoreError> {
    payload.validate().map_err(CoreError::from)
}

/// `validator` custom rule for actor gender.
pub fn validate_gender(gender: &str) -> Result<(), validator::ValidationError> {
    if VALID_GENDERS.contains(&normalize_gender(gender).as_str()) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("gender");
        err.message = Some(format!("gender must be one of: {}", VALID_GENDERS.join(", ")).into());
        Err(err)
    }
}

/// Canonical storage form of a gender value.
pub fn normalize_gender(gender: &str) -> String {
    gender.trim().to_ascii_lowercase()
}

/// `validator` custom rule rejecting strings that are only whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 3, message = "name must be 1-3 characters"))]
        name: String,
        #[validate(range(min = 0.0, max = 10.0))]
        score: f64,
        #[validate(custom(function = "validate_gender"))]
        gender: String,
    }

    #[test]
    fn collects_every_failing_field() {
        let sample = Sample {
            name: "toolong".into(),
            score: 11.0,
            gender: "robot".into(),
        };
        let err = validate_payload(&sample).unwrap_err();
        let CoreError::InvalidFields(fields) = err else {
            panic!("expected InvalidFields");
        };
        let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, vec!["gender", "name", "score"]);
        assert_eq!(fields[1].message, "name must be 1-3 characters");
        assert!(fields[0].message.starts_with("gender must be one of"));
    }

    #[test]
    fn gender_is_case_insensitive() {
        assert!(validate_gender("Female").is_ok());
        assert!(validate_gender(" MALE ").is_ok());
        assert_eq!(normalize_gender(" Other "), "other");
    }

    #[test]
    fn blank_strings_rejected() {
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank(" a ").is_ok());
    }
}
