use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::support_service::{self, RespondOutcome, TicketOutcome};
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
pub struct CreateTicketBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

pub async fn create_ticket_handler(
    Extension(_caller): Extension<AuthenticatedCaller>,
    State(pool): State<SqlitePool>,
    Json(body): Json<CreateTicketBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match support_service::create_ticket(
        &pool,
        &body.email,
        &body.category,
        &body.subject,
        &body.message,
    )
    .await
    {
        Ok(TicketOutcome::Created(ticket)) => Ok(Json(json!({ "success": true, "ticket": ticket }))),
        Ok(TicketOutcome::MissingField(field)) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing_field", "field": field })),
        )),
        Err(e) => {
            warn!("Ticket creation failed: {}", e);
            Err(internal_error())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TicketListQuery {
    pub email: Option<String>,
}

pub async fn list_tickets_handler(
    Extension(_caller): Extension<AuthenticatedCaller>,
    State(pool): State<SqlitePool>,
    Query(query): Query<TicketListQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(email) = query.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
        return Err(bad_request("missing_email"));
    };

    match support_service::list_for_participant(&pool, email).await {
        Ok(tickets) => Ok(Json(json!({ "success": true, "tickets": tickets }))),
        Err(e) => {
            warn!("Ticket list failed for {}: {}", email, e);
            Err(internal_error())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdminTicketsQuery {
    pub status: Option<String>,
}

pub async fn admin_list_handler(
    Extension(_admin): Extension<AdminContext>,
    State(pool): State<SqlitePool>,
    Query(query): Query<AdminTicketsQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match support_service::list_all(&pool, query.status.as_deref()).await {
        Ok(tickets) => Ok(Json(json!({ "success": true, "tickets": tickets }))),
        Err(e) => {
            warn!("Admin ticket list failed: {}", e);
            Err(internal_error())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RespondBody {
    #[serde(default)]
    pub ticket_id: String,
    #[serde(default)]
    pub response: String,
    pub status: Option<String>,
}

pub async fn respond_handler(
    Extension(_admin): Extension<AdminContext>,
    State(pool): State<SqlitePool>,
    Json(body): Json<RespondBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match support_service::respond_to_ticket(
        &pool,
        body.ticket_id.trim(),
        &body.response,
        body.status.as_deref(),
    )
    .await
    {
        Ok(RespondOutcome::Responded(ticket)) => {
            Ok(Json(json!({ "success": true, "ticket": ticket })))
        }
        Ok(RespondOutcome::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found" })),
        )),
        Ok(RespondOutcome::MissingResponse) => Err(bad_request("missing_response")),
        Err(e) => {
            warn!("Ticket response failed: {}", e);
            Err(internal_error())
        }
    }
}
