use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::auth_service::{self, AdminLoginOutcome};
use crate::services::{analytics_service, expiry_service, participant_service, risk_service};
use crate::web::middleware::auth::AdminContext;

fn internal_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal_error" })),
    )
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_handler(
    Json(body): Json<AdminLoginBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match auth_service::login_admin(&body.email, &body.password) {
        AdminLoginOutcome::LoggedIn { token, role } => Ok(Json(json!({
            "success": true,
            "token": token,
            "role": role
        }))),
        AdminLoginOutcome::InvalidCredentials => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_credentials" })),
        )),
    }
}

pub async fn list_participants_handler(
    Extension(_admin): Extension<AdminContext>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match participant_service::list_all_views(&pool).await {
        Ok(participants) => Ok(Json(json!({ "success": true, "participants": participants }))),
        Err(e) => {
            warn!("Participant list failed: {}", e);
            Err(internal_error())
        }
    }
}

pub async fn stats_handler(
    Extension(_admin): Extension<AdminContext>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match analytics_service::load_platform_stats(&pool).await {
        Ok(stats) => Ok(Json(json!({ "success": true, "stats": stats }))),
        Err(e) => {
            warn!("Stats load failed: {}", e);
            Err(internal_error())
        }
    }
}

pub async fn check_expired_handler(
    Extension(_admin): Extension<AdminContext>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match expiry_service::freeze_expired_participants(&pool).await {
        Ok(report) => Ok(Json(json!({ "success": true, "frozen": report.frozen }))),
        Err(e) => {
            warn!("Expiry sweep failed: {}", e);
            Err(internal_error())
        }
    }
}

// Recompute is the one super-admin-only operation in the back office.
pub async fn recompute_risk_handler(
    Extension(admin): Extension<AdminContext>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if admin.role != "super_admin" {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "forbidden" })),
        ));
    }

    match risk_service::recompute_risk_scores(&pool).await {
        Ok(report) => Ok(Json(json!({
            "success": true,
            "scanned": report.scanned,
            "flagged": report.flagged
        }))),
        Err(e) => {
            warn!("Risk recompute failed: {}", e);
            Err(internal_error())
        }
    }
}
