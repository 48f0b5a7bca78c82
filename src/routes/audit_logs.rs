use axum::extract::State;
use axum::Json;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::AuditLog;
use crate::state::SharedState;

// Any authenticated user may read the full trail; no role gate exists yet.
pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<AuditLog>>, AppError> {
    Ok(Json(db::audit::list(&state.pool).await?))
}
