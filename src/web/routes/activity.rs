use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::activity_service::{self, AppendOutcome};
use crate::web::middleware::auth::{AdminContext, AuthenticatedCaller};

fn bad_request(reason: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": reason })))
}

fn internal_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal_error" })),
    )
}

#[derive(Debug, Deserialize)]
pub struct AppendBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub action: String,
    pub detail: Option<String>,
}

pub async fn append_handler(
    Extension(_caller): Extension<AuthenticatedCaller>,
    State(pool): State<SqlitePool>,
    Json(body): Json<AppendBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match activity_service::append_entry(&pool, &body.email, &body.action, body.detail.as_deref())
        .await
    {
        Ok(AppendOutcome::Appended(id)) => Ok(Json(json!({ "success": true, "id": id }))),
        Ok(AppendOutcome::MissingField(field)) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing_field", "field": field })),
        )),
        Err(e) => {
            warn!("Activity append failed: {}", e);
            Err(internal_error())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FetchQuery {
    pub email: Option<String>,
    pub limit: Option<i64>,
}

pub async fn fetch_handler(
    Extension(_caller): Extension<AuthenticatedCaller>,
    State(pool): State<SqlitePool>,
    Query(query): Query<FetchQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(email) = query.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
        return Err(bad_request("missing_email"));
    };

    match activity_service::list_for_participant(&pool, email, query.limit).await {
        Ok(entries) => Ok(Json(json!({ "success": true, "entries": entries }))),
        Err(e) => {
            warn!("Activity fetch failed for {}: {}", email, e);
            Err(internal_error())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdminFetchQuery {
    pub limit: Option<i64>,
}

pub async fn admin_fetch_handler(
    Extension(_admin): Extension<AdminContext>,
    State(pool): State<SqlitePool>,
    Query(query): Query<AdminFetchQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match activity_service::list_recent(&pool, query.limit).await {
        Ok(entries) => Ok(Json(json!({ "success": true, "entries": entries }))),
        Err(e) => {
            warn!("Admin activity fetch failed: {}", e);
            Err(internal_error())
        }
    }
}
