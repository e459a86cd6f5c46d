//! User validation

use thiserror::Error;

/// Errors that can occur while validating identity values
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("External ID cannot be empty")]
    EmptyExternalId,
}

/// Validate an identity-provider actor identifier
///
/// The value is opaque and already authenticated upstream; only emptiness is rejected.
pub fn validate_external_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyExternalId);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_external_ids() {
        assert!(validate_external_id("user_2NNEqL2nrIRdJ194ndJqAHwEfxC").is_ok());
        assert!(validate_external_id("auth0|5f7c8ec7c33c6c004bbafe82").is_ok());
        assert!(validate_external_id("a").is_ok());
    }

    #[test]
    fn test_empty_external_id() {
        assert_eq!(
            validate_external_id(""),
            Err(UserValidationError::EmptyExternalId)
        );
    }

    #[test]
    fn test_opaque_ids_are_accepted_verbatim() {
        assert!(validate_external_id("Jane Doe|idp").is_ok());
        assert!(validate_external_id(&"x".repeat(300)).is_ok());
    }
}
