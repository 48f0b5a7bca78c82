use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Order, OrderItem, OrderStatus};

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    status: OrderStatus,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "INSERT INTO orders (user_id, status, total_price) VALUES ($1, $2, 0) RETURNING *",
    )
    .bind(user_id)
    .bind(status.as_str())
    .fetch_one(executor)
    .await
}

pub async fn set_total<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    total_price: Decimal,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as::<_, Order>("UPDATE orders SET total_price = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(total_price)
        .fetch_one(executor)
        .await
}

pub async fn create_item<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    order_id: Uuid,
    product_id: Uuid,
    position: i32,
    quantity: i32,
    price: Decimal,
) -> Result<OrderItem, sqlx::Error> {
    sqlx::query_as::<_, OrderItem>(
        "INSERT INTO order_items (order_id, product_id, position, quantity, price)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(order_id)
    .bind(product_id)
    .bind(position)
    .bind(quantity)
    .bind(price)
    .fetch_one(executor)
    .await
}

pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_for_user(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_items(pool: &PgPool, order_ids: &[Uuid]) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as::<_, OrderItem>(
        "SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY order_id, position",
    )
    .bind(order_ids)
    .fetch_all(pool)
    .await
}
