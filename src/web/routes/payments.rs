use axum::{
    extract::{FromRequest, Multipart, Query, Request, State},
    http::{header, StatusCode},
    Extension, Json,
};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::payment_service::{
    self, ReviewOutcome, ScreenshotUpload, SubmissionInput, SubmissionOutcome,
};
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
pub struct SubmitPaymentBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub method: String,
    pub screenshot_base64: Option<String>,
    pub screenshot_mime: Option<String>,
}

// Proof of payment arrives either as JSON with a base64 screenshot or as a
// multipart form with a file part; the content type decides.
pub async fn submit_handler(
    Extension(_caller): Extension<AuthenticatedCaller>,
    State(pool): State<SqlitePool>,
    request: Request,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let input = if content_type.starts_with("multipart/form-data") {
        multipart_input(request).await?
    } else {
        json_input(request).await?
    };

    match payment_service::submit_payment(&pool, input).await {
        Ok(SubmissionOutcome::Submitted(row)) => {
            Ok(Json(json!({ "success": true, "submission": row })))
        }
        Ok(SubmissionOutcome::ParticipantNotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "participant_not_found" })),
        )),
        Ok(SubmissionOutcome::InvalidAmount) => Err(bad_request("invalid_amount")),
        Ok(SubmissionOutcome::MissingMethod) => Err(bad_request("missing_method")),
        Err(e) => {
            warn!("Payment submission failed: {}", e);
            Err(internal_error())
        }
    }
}

async fn json_input(request: Request) -> Result<SubmissionInput, (StatusCode, Json<Value>)> {
    let Json(body) = Json::<SubmitPaymentBody>::from_request(request, &())
        .await
        .map_err(|_| bad_request("invalid_json"))?;

    let screenshot = match body.screenshot_base64.as_deref().map(str::trim) {
        Some(encoded) if !encoded.is_empty() => {
            let bytes = general_purpose::STANDARD
                .decode(encoded)
                .map_err(|_| bad_request("invalid_screenshot"))?;
            Some(ScreenshotUpload {
                mime: body
                    .screenshot_mime
                    .unwrap_or_else(|| "image/png".to_string()),
                bytes,
            })
        }
        _ => None,
    };

    Ok(SubmissionInput {
        email: body.email,
        amount: body.amount,
        method: body.method,
        screenshot,
    })
}

async fn multipart_input(request: Request) -> Result<SubmissionInput, (StatusCode, Json<Value>)> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|_| bad_request("invalid_multipart"))?;

    let mut email = String::new();
    let mut amount = 0i64;
    let mut method = String::new();
    let mut screenshot = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| bad_request("invalid_multipart"))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "email" => {
                email = field
                    .text()
                    .await
                    .map_err(|_| bad_request("invalid_multipart"))?;
            }
            "amount" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|_| bad_request("invalid_multipart"))?;
                amount = raw.trim().parse().unwrap_or(0);
            }
            "method" => {
                method = field
                    .text()
                    .await
                    .map_err(|_| bad_request("invalid_multipart"))?;
            }
            "screenshot" => {
                let mime = field
                    .content_type()
                    .unwrap_or("image/png")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| bad_request("invalid_multipart"))?
                    .to_vec();
                if !bytes.is_empty() {
                    screenshot = Some(ScreenshotUpload { mime, bytes });
                }
            }
            _ => {}
        }
    }

    Ok(SubmissionInput {
        email,
        amount,
        method,
        screenshot,
    })
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusQuery {
    pub email: Option<String>,
}

pub async fn status_handler(
    Extension(_caller): Extension<AuthenticatedCaller>,
    State(pool): State<SqlitePool>,
    Query(query): Query<PaymentStatusQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(email) = query.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
        return Err(bad_request("missing_email"));
    };

    match payment_service::list_for_participant(&pool, email).await {
        Ok(submissions) => Ok(Json(json!({ "success": true, "submissions": submissions }))),
        Err(e) => {
            warn!("Payment status load failed for {}: {}", email, e);
            Err(internal_error())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdminPaymentsQuery {
    pub status: Option<String>,
}

pub async fn admin_list_handler(
    Extension(_admin): Extension<AdminContext>,
    State(pool): State<SqlitePool>,
    Query(query): Query<AdminPaymentsQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("pending");

    match payment_service::list_by_status(&pool, status).await {
        Ok(submissions) => Ok(Json(json!({ "success": true, "submissions": submissions }))),
        Err(e) => {
            warn!("Admin payment list failed: {}", e);
            Err(internal_error())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    #[serde(default)]
    pub submission_id: String,
    #[serde(default)]
    pub decision: String,
    pub note: Option<String>,
}

pub async fn review_handler(
    Extension(admin): Extension<AdminContext>,
    State(pool): State<SqlitePool>,
    Json(body): Json<ReviewBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match payment_service::review_submission(
        &pool,
        body.submission_id.trim(),
        body.decision.trim(),
        body.note.as_deref(),
        admin.role,
    )
    .await
    {
        Ok(ReviewOutcome::Approved(row)) | Ok(ReviewOutcome::Rejected(row)) => {
            Ok(Json(json!({ "success": true, "submission": row })))
        }
        Ok(ReviewOutcome::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found" })),
        )),
        Ok(ReviewOutcome::AlreadyReviewed) => Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": "already_reviewed" })),
        )),
        Ok(ReviewOutcome::InvalidDecision) => Err(bad_request("invalid_decision")),
        Err(e) => {
            warn!("Payment review failed: {}", e);
            Err(internal_error())
        }
    }
}
