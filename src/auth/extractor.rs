use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

use crate::auth::{credentials, AuthError};
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

/// The user behind a valid bearer token. Handlers taking this argument
/// never run for unauthenticated requests.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::from(AuthError::InvalidToken))?;

        let user =
            credentials::validate(&state.pool, &state.config.jwt_secret, bearer.token()).await?;

        Ok(AuthUser(user))
    }
}
