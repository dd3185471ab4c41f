//! Field validation for incoming documents.

/// Why a document was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// A field is present but its value is not acceptable.
    #[error("{field} {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
    /// The body could not be read as this entity at all (wrong JSON types).
    #[error("Invalid request body: {0}")]
    Malformed(String),
}

/// Require a non-blank string.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Require a non-blank string that looks like an email address.
pub fn require_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    check_email(field, value)
}

/// Validate an optional email address when one was supplied.
pub fn optional_email(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => check_email(field, v),
        _ => Ok(()),
    }
}

fn check_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidField {
            field,
            reason: "must be a valid email address",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        assert_eq!(require("title", "   "), Err(ValidationError::MissingField("title")));
        assert!(require("title", "Open Day").is_ok());
    }

    #[test]
    fn test_email_checks() {
        assert!(require_email("email", "a@school.org").is_ok());
        assert!(require_email("email", "not-an-email").is_err());
        assert!(require_email("email", "a@localhost").is_err());
        assert!(optional_email("email", None).is_ok());
        assert!(optional_email("email", Some("")).is_ok());
        assert!(optional_email("email", Some("x@")).is_err());
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::MissingField("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::InvalidField {
                field: "email",
                reason: "must be a valid email address"
            }
            .to_string(),
            "email must be a valid email address"
        );
    }
}
