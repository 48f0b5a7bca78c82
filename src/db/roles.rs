use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Role;

pub async fn create(pool: &PgPool, name: &str) -> Result<Role, sqlx::Error> {
    sqlx::query_as::<_, Role>("INSERT INTO roles (name) VALUES ($1) RETURNING *")
        .bind(name)
        .fetch_one(pool)
        .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
    sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Role>, sqlx::Error> {
    sqlx::query_as::<_, Role>(
        "SELECT r.* FROM roles r
         JOIN user_roles ur ON ur.role_id = r.id
         WHERE ur.user_id = $1
         ORDER BY r.name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
