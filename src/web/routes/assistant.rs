use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::services::assistant_service::{self, ChatMessage};
use crate::web::middleware::auth::AuthenticatedCaller;

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

// The upstream already speaks server-sent events; relay its bytes untouched.
pub async fn chat_handler(
    Extension(_caller): Extension<AuthenticatedCaller>,
    Json(body): Json<ChatBody>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    if body.messages.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "empty_messages" })),
        ));
    }

    let upstream = assistant_service::stream_chat_completion(&body.messages)
        .await
        .map_err(|e| {
            warn!(status = %e.status, body = ?e.body, "assistant_upstream_failed");
            (
                e.status,
                Json(
                    e.body
                        .unwrap_or_else(|| json!({ "error": "bad_gateway" })),
                ),
            )
        })?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(upstream.bytes_stream()))
        .unwrap();
    Ok(response)
}
