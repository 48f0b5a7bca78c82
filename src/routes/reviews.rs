use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::middleware::audit;
use crate::models::Review;
use crate::state::SharedState;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Deserialize)]
pub struct CreateReview {
    pub product_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

pub async fn create(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<CreateReview>,
) -> Result<Json<Review>, AppError> {
    if !(MIN_RATING..=MAX_RATING).contains(&req.rating) {
        return Err(AppError::BadRequest(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }

    let review = db::reviews::create(
        &state.pool,
        user.id,
        req.product_id,
        req.rating,
        req.comment.as_deref(),
    )
    .await
    .map_err(|e| AppError::missing_reference(e, "Product not found"))?;

    audit::log_event(&state.pool, user.id, audit::CREATE, "reviews", review.id).await;

    Ok(Json(review))
}
