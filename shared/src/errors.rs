//! Error types for the Blog API

use thiserror::Error;

/// Authentication error types
///
/// Every token failure maps to [`AuthError::InvalidToken`], whatever the
/// cause.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing token")]
    MissingToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_does_not_name_the_field() {
        let message = AuthError::InvalidCredentials.to_string();
        assert_eq!(message, "Invalid email or password");
    }
}
