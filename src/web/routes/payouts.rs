use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::payout_service::{self, PayoutRequestOutcome, ProcessOutcome};
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
pub struct PayoutRequestBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub destination_address: String,
}

pub async fn request_handler(
    Extension(_caller): Extension<AuthenticatedCaller>,
    State(pool): State<SqlitePool>,
    Json(body): Json<PayoutRequestBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match payout_service::request_payout(&pool, &body.email, body.amount, &body.destination_address)
        .await
    {
        Ok(PayoutRequestOutcome::Requested(row)) => {
            Ok(Json(json!({ "success": true, "payout": row })))
        }
        Ok(PayoutRequestOutcome::ParticipantNotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "participant_not_found" })),
        )),
        Ok(PayoutRequestOutcome::NotActive) => Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "not_active" })),
        )),
        Ok(PayoutRequestOutcome::InvalidAmount) => Err(bad_request("invalid_amount")),
        Ok(PayoutRequestOutcome::MissingDestination) => Err(bad_request("missing_destination")),
        Ok(PayoutRequestOutcome::InsufficientBalance) => Err(bad_request("insufficient_balance")),
        Err(e) => {
            warn!("Payout request failed: {}", e);
            Err(internal_error())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PayoutStatusQuery {
    pub email: Option<String>,
}

pub async fn status_handler(
    Extension(_caller): Extension<AuthenticatedCaller>,
    State(pool): State<SqlitePool>,
    Query(query): Query<PayoutStatusQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(email) = query.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
        return Err(bad_request("missing_email"));
    };

    match payout_service::list_for_participant(&pool, email).await {
        Ok(payouts) => Ok(Json(json!({ "success": true, "payouts": payouts }))),
        Err(e) => {
            warn!("Payout status load failed for {}: {}", email, e);
            Err(internal_error())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdminPayoutsQuery {
    pub status: Option<String>,
}

pub async fn admin_list_handler(
    Extension(_admin): Extension<AdminContext>,
    State(pool): State<SqlitePool>,
    Query(query): Query<AdminPayoutsQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("pending");

    match payout_service::list_by_status(&pool, status).await {
        Ok(payouts) => Ok(Json(json!({ "success": true, "payouts": payouts }))),
        Err(e) => {
            warn!("Admin payout list failed: {}", e);
            Err(internal_error())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProcessBody {
    #[serde(default)]
    pub payout_id: String,
    #[serde(default)]
    pub decision: String,
}

pub async fn process_handler(
    Extension(_admin): Extension<AdminContext>,
    State(pool): State<SqlitePool>,
    Json(body): Json<ProcessBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match payout_service::process_payout(&pool, body.payout_id.trim(), body.decision.trim()).await
    {
        Ok(ProcessOutcome::Processed(row)) => Ok(Json(json!({ "success": true, "payout": row }))),
        Ok(ProcessOutcome::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found" })),
        )),
        Ok(ProcessOutcome::AlreadyProcessed) => Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": "already_processed" })),
        )),
        Ok(ProcessOutcome::InvalidDecision) => Err(bad_request("invalid_decision")),
        Err(e) => {
            warn!("Payout processing failed: {}", e);
            Err(internal_error())
        }
    }
}
