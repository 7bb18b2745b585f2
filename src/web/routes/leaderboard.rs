use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::leaderboard_service;

pub async fn leaderboard_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match leaderboard_service::build_leaderboard(&pool).await {
        Ok(entries) => Ok(Json(json!({ "success": true, "leaderboard": entries }))),
        Err(e) => {
            warn!("Leaderboard build failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error" })),
            ))
        }
    }
}
