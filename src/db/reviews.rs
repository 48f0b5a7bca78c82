use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Review;

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    product_id: Uuid,
    rating: i32,
    comment: Option<&str>,
) -> Result<Review, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "INSERT INTO reviews (user_id, product_id, rating, comment)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(rating)
    .bind(comment)
    .fetch_one(pool)
    .await
}

pub async fn list_by_product(pool: &PgPool, product_id: Uuid) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE product_id = $1 ORDER BY created_at DESC",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await
}
