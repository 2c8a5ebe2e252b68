use std::collections::BTreeMap;

use thiserror::Error;

use crate::api::ApiError;

/// Field name -> rejection messages, as returned by the backend for invalid
/// registration or profile submissions.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("validation failed: {}", summarize_fields(.0))]
    Validation(FieldErrors),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    Api(ApiError),

    #[error("failed to persist session tokens: {0}")]
    Storage(String),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => AuthError::InvalidCredentials,
            ApiError::Network(e) => AuthError::Network(e),
            other => AuthError::Api(other),
        }
    }
}

fn summarize_fields(fields: &FieldErrors) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_lists_fields() {
        let mut fields = FieldErrors::new();
        fields.insert(
            "email".to_string(),
            vec!["Enter a valid email address.".to_string()],
        );
        fields.insert(
            "username".to_string(),
            vec!["A user with that username already exists.".to_string()],
        );

        let err = AuthError::Validation(fields);
        let message = err.to_string();
        assert!(message.contains("email: Enter a valid email address."));
        assert!(message.contains("username: A user with that username already exists."));
    }

    #[test]
    fn unauthorized_converts_to_invalid_credentials() {
        let err: AuthError = ApiError::Unauthorized.into();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
