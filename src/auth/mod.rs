pub mod credentials;
pub mod extractor;
pub mod jwt;
pub mod password;

use crate::error::AppError;

/// Failures of the credential store and token service.
#[derive(Debug)]
pub enum AuthError {
    DuplicateEmail,
    BadCredentials,
    InvalidToken,
    Expired,
    UserNotFound,
    Internal(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::DuplicateEmail => write!(f, "email already registered"),
            AuthError::BadCredentials => write!(f, "bad credentials"),
            AuthError::InvalidToken => write!(f, "invalid token"),
            AuthError::Expired => write!(f, "token expired"),
            AuthError::UserNotFound => write!(f, "token subject not found"),
            AuthError::Internal(msg) => write!(f, "{msg}"),
            AuthError::Database(err) => write!(f, "{err}"),
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Database(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateEmail => {
                AppError::Conflict("Email already registered".to_string())
            }
            AuthError::BadCredentials => AppError::Unauthorized("Bad credentials".to_string()),
            rejected @ (AuthError::InvalidToken | AuthError::Expired | AuthError::UserNotFound) => {
                tracing::debug!("Rejected bearer token: {rejected}");
                AppError::Unauthorized("Invalid token".to_string())
            }
            AuthError::Internal(msg) => AppError::Internal(msg),
            AuthError::Database(e) => AppError::Database(e),
        }
    }
}
