use sqlx::PgPool;
use uuid::Uuid;

use crate::models::AuditLog;

pub async fn log_event(
    pool: &PgPool,
    user_id: Uuid,
    action: &str,
    table_name: &str,
    record_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_logs (user_id, action, table_name, record_id)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(action)
    .bind(table_name)
    .bind(record_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list(pool: &PgPool) -> Result<Vec<AuditLog>, sqlx::Error> {
    sqlx::query_as::<_, AuditLog>("SELECT * FROM audit_logs ORDER BY created_at DESC, id")
        .fetch_all(pool)
        .await
}
