use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::middleware::audit;
use crate::models::{Category, Product};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub parent_id: Option<Uuid>,
}

pub async fn create(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<CreateCategory>,
) -> Result<Json<Category>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Category name is required".to_string()));
    }

    let category = db::categories::create(&state.pool, name, req.parent_id)
        .await
        .map_err(|e| AppError::missing_reference(e, "Parent category not found"))?;

    audit::log_event(&state.pool, user.id, audit::CREATE, "categories", category.id).await;

    Ok(Json(category))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(db::categories::list(&state.pool).await?))
}

pub async fn children(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<Vec<Category>>, AppError> {
    ensure_exists(&state, id).await?;
    Ok(Json(db::categories::list_children(&state.pool, id).await?))
}

pub async fn products(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<Vec<Product>>, AppError> {
    ensure_exists(&state, id).await?;
    Ok(Json(
        db::products::list_active_by_category(&state.pool, id).await?,
    ))
}

async fn ensure_exists(state: &SharedState, id: Uuid) -> Result<(), AppError> {
    db::categories::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
}
