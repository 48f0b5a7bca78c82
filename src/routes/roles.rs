use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::Role;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateRole {
    pub name: String,
}

// No authentication: role management has no documented access policy yet.
pub async fn create(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<CreateRole>,
) -> Result<Json<Role>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Role name is required".to_string()));
    }

    let role = db::roles::create(&state.pool, name)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("A role with this name already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(Json(role))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Role>>, AppError> {
    Ok(Json(db::roles::list(&state.pool).await?))
}
