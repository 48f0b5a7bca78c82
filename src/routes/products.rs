use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::products::NewProduct;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::middleware::audit;
use crate::models::{Product, Review};
use crate::state::SharedState;

/// Matches the NUMERIC(10, 2) price column.
const PRICE_SCALE: u32 = 2;

#[derive(Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
}

pub async fn create(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<CreateProduct>,
) -> Result<Json<Product>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Product name is required".to_string()));
    }
    validate_price(req.price)?;
    if req.stock < 0 {
        return Err(AppError::BadRequest("Stock cannot be negative".to_string()));
    }

    let product = db::products::create(
        &state.pool,
        &NewProduct {
            name,
            description: req.description.as_deref(),
            price: req.price,
            stock: req.stock,
            category_id: req.category_id,
        },
    )
    .await
    .map_err(|e| AppError::missing_reference(e, "Category not found"))?;

    audit::log_event(&state.pool, user.id, audit::CREATE, "products", product.id).await;

    Ok(Json(product))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(db::products::list_active(&state.pool).await?))
}

pub async fn get(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<Product>, AppError> {
    let product = db::products::find_active_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    Ok(Json(product))
}

pub async fn reviews(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(db::reviews::list_by_product(&state.pool, id).await?))
}

pub fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price < Decimal::ZERO {
        return Err(AppError::BadRequest("Price cannot be negative".to_string()));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(AppError::BadRequest(
            "Price must have at most 2 decimal places".to_string(),
        ));
    }
    if price > Decimal::new(99_999_999_99, PRICE_SCALE) {
        return Err(AppError::BadRequest("Price is too large".to_string()));
    }
    Ok(())
}
