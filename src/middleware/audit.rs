use sqlx::PgPool;
use uuid::Uuid;

pub const CREATE: &str = "CREATE";

/// Append an audit row. Call only after the audited write has committed;
/// a failure here is logged and never undoes that write.
pub async fn log_event(
    pool: &PgPool,
    user_id: Uuid,
    action: &str,
    table_name: &str,
    record_id: Uuid,
) {
    if let Err(e) =
        crate::db::audit::log_event(pool, user_id, action, table_name, record_id).await
    {
        tracing::error!(%user_id, %record_id, "Failed to log audit event on {table_name}: {e}");
    }
}
