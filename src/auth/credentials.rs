use chrono::Duration;
use sqlx::PgPool;

use crate::auth::jwt::{self, Claims, TokenError};
use crate::auth::{password, AuthError};
use crate::db;
use crate::models::User;

/// Create a user with a salted Argon2id hash of `password`.
pub async fn register(
    pool: &PgPool,
    email: &str,
    password: &str,
    full_name: Option<&str>,
) -> Result<User, AuthError> {
    if db::users::find_by_email(pool, email).await?.is_some() {
        return Err(AuthError::DuplicateEmail);
    }

    let pw_hash = password::hash(password).map_err(AuthError::Internal)?;

    db::users::create(pool, email, &pw_hash, full_name)
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent registration of the same email.
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AuthError::DuplicateEmail
            }
            _ => AuthError::Database(e),
        })
}

/// Check credentials and issue a signed access token.
///
/// Unknown email, wrong password and inactive account all fail with
/// `BadCredentials`, and each path runs one Argon2 verification.
pub async fn authenticate(
    pool: &PgPool,
    secret: &str,
    ttl: Duration,
    email: &str,
    password: &str,
) -> Result<String, AuthError> {
    let Some(user) = db::users::find_by_email(pool, email).await? else {
        password::verify_dummy(password);
        return Err(AuthError::BadCredentials);
    };

    let valid = password::verify(password, &user.password_hash).map_err(AuthError::Internal)?;
    if !valid || !user.is_active {
        return Err(AuthError::BadCredentials);
    }

    jwt::encode_token(&Claims::new(&user.email, ttl), secret).map_err(AuthError::Internal)
}

/// Resolve a bearer token to the current user record.
pub async fn validate(pool: &PgPool, secret: &str, token: &str) -> Result<User, AuthError> {
    let claims = jwt::decode_token(token, secret).map_err(|e| match e {
        TokenError::Expired => AuthError::Expired,
        TokenError::Invalid(_) => AuthError::InvalidToken,
    })?;

    match db::users::find_by_email(pool, &claims.sub).await? {
        Some(user) if user.is_active => Ok(user),
        _ => Err(AuthError::UserNotFound),
    }
}
