// handlers/public/health.rs - GET /heartbeat, GET /health

use axum::{extract::Extension, http::StatusCode, response::Json};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::database::manager::DatabaseManager;

/// GET /heartbeat - process liveness, never touches the database
pub async fn heartbeat() -> Json<Value> {
    Json(json!({}))
}

/// GET /health - pings the pool
pub async fn health(Extension(pool): Extension<PgPool>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": "database unavailable",
                    "status": "degraded",
                    "timestamp": now
                })),
            )
        }
    }
}
