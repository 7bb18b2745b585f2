use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::auth_service::{self, ParticipantLoginOutcome};
use crate::services::participant_service;
use crate::services::registration_service::{self, RegistrationInput, RegistrationOutcome};
use crate::web::middleware::auth::AuthenticatedCaller;

fn internal_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal_error" })),
    )
}

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub wallet_address: String,
    #[serde(default)]
    pub password: String,
    pub referral_code: Option<String>,
}

pub async fn register_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let input = RegistrationInput {
        full_name: body.full_name,
        email: body.email,
        phone: body.phone,
        wallet_address: body.wallet_address,
        password: body.password,
        referral_code: body.referral_code,
    };

    match registration_service::register_participant(&pool, input).await {
        Ok(RegistrationOutcome::Registered(view)) => Ok(Json(json!({
            "success": true,
            "participant": view,
            "token": auth_service::mint_participant_token()
        }))),
        Ok(RegistrationOutcome::MissingField(field)) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing_field", "field": field })),
        )),
        Ok(RegistrationOutcome::InvalidEmail) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_email" })),
        )),
        Ok(RegistrationOutcome::DuplicateEmail) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "duplicate_email" })),
        )),
        Ok(RegistrationOutcome::DuplicatePhone) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "duplicate_phone" })),
        )),
        Ok(RegistrationOutcome::DuplicateWallet) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "duplicate_wallet" })),
        )),
        Err(e) => {
            warn!("Registration failed: {}", e);
            Err(internal_error())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<LoginBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match auth_service::login_participant(&pool, &body.email, &body.password).await {
        Ok(ParticipantLoginOutcome::LoggedIn { token, participant }) => Ok(Json(json!({
            "success": true,
            "token": token,
            "participant": participant_service::participant_view(&participant)
        }))),
        Ok(ParticipantLoginOutcome::InvalidCredentials) => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_credentials" })),
        )),
        Err(e) => {
            warn!("Participant login failed: {}", e);
            Err(internal_error())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub email: Option<String>,
}

pub async fn profile_handler(
    Extension(_caller): Extension<AuthenticatedCaller>,
    State(pool): State<SqlitePool>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(email) = query.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing_email" })),
        ));
    };

    match participant_service::load_profile(&pool, email).await {
        Ok(Some(view)) => Ok(Json(json!({ "success": true, "participant": view }))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found" })),
        )),
        Err(e) => {
            warn!("Profile load failed for {}: {}", email, e);
            Err(internal_error())
        }
    }
}
