use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Category;

pub async fn create(
    pool: &PgPool,
    name: &str,
    parent_id: Option<Uuid>,
) -> Result<Category, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, parent_id) VALUES ($1, $2) RETURNING *",
    )
    .bind(name)
    .bind(parent_id)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_children(pool: &PgPool, parent_id: Uuid) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "SELECT * FROM categories WHERE parent_id = $1 ORDER BY name",
    )
    .bind(parent_id)
    .fetch_all(pool)
    .await
}
