use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::referral_service;

pub async fn lookup_handler(
    Path(code): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match referral_service::lookup_referral(&pool, &code).await {
        Ok(Some(view)) => Ok(Json(json!({ "success": true, "referral": view }))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found" })),
        )),
        Err(e) => {
            warn!("Referral lookup failed for {}: {}", code, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error" })),
            ))
        }
    }
}
