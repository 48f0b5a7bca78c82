use std::sync::LazyLock;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::credentials;
use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{FormBody, JsonBody};
use crate::models::{Role, User};
use crate::state::SharedState;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// OAuth2 password-grant form: `username` carries the email.
#[derive(Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub roles: Vec<Role>,
}

impl UserResponse {
    pub fn new(user: User, roles: Vec<Role>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
            created_at: user.created_at,
            roles,
        }
    }
}

pub async fn register(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }
    if !EMAIL_RE.is_match(&email) {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    let full_name = req
        .full_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let user = credentials::register(&state.pool, &email, &req.password, full_name).await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(UserResponse::new(user, Vec::new())))
}

pub async fn token(
    State(state): State<SharedState>,
    FormBody(req): FormBody<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = req.username.trim().to_lowercase();

    let access_token = credentials::authenticate(
        &state.pool,
        &state.config.jwt_secret,
        state.config.token_ttl(),
        &email,
        &req.password,
    )
    .await?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

pub async fn me(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<UserResponse>, AppError> {
    let roles = db::roles::list_for_user(&state.pool, user.id).await?;
    Ok(Json(UserResponse::new(user, roles)))
}
