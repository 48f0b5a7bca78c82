use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Product;

pub struct NewProduct<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
}

pub async fn create(pool: &PgPool, new: &NewProduct<'_>) -> Result<Product, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, description, price, stock, category_id)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(new.name)
    .bind(new.description)
    .bind(new.price)
    .bind(new.stock)
    .bind(new.category_id)
    .fetch_one(pool)
    .await
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE is_active = true ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_active_by_category(
    pool: &PgPool,
    category_id: Uuid,
) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE category_id = $1 AND is_active = true
         ORDER BY created_at, id",
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
}

pub async fn find_active_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 AND is_active = true")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Any product, active or not, among `ids`. Used inside the checkout transaction.
pub async fn find_many<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    ids: &[Uuid],
) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(executor)
        .await
}
