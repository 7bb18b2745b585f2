use axum::http::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// The assistant endpoint is a pass-through to an OpenAI-compatible
// chat-completions upstream; the crate never interprets the stream.

#[derive(Debug)]
pub struct AssistantUpstreamError {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl AssistantUpstreamError {
    fn new(status: StatusCode, body: Option<Value>) -> Self {
        Self { status, body }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

fn assistant_base_url() -> String {
    std::env::var("ASSISTANT_API_URL")
        .unwrap_or_else(|_| "https://api.openai.com/v1".to_string())
}

fn assistant_api_key() -> String {
    std::env::var("ASSISTANT_API_KEY").unwrap_or_default()
}

fn assistant_model() -> String {
    std::env::var("ASSISTANT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string())
}

fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(auth_value) = HeaderValue::from_str(&format!("Bearer {}", api_key)) {
        headers.insert(AUTHORIZATION, auth_value);
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

fn connect_failed(url: &str, err: impl ToString) -> AssistantUpstreamError {
    AssistantUpstreamError::new(
        StatusCode::BAD_GATEWAY,
        Some(serde_json::json!({
            "error": "connect_failed",
            "detail": err.to_string(),
            "url": url
        })),
    )
}

// Returns the raw upstream response so the route can relay its byte stream.
pub async fn stream_chat_completion(
    messages: &[ChatMessage],
) -> Result<reqwest::Response, AssistantUpstreamError> {
    let url = format!(
        "{}/chat/completions",
        assistant_base_url().trim_end_matches('/')
    );

    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .headers(bearer_headers(&assistant_api_key()))
        .json(&serde_json::json!({
            "model": assistant_model(),
            "messages": messages,
            "stream": true
        }))
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    if !status.is_success() {
        let body: Value = resp
            .json()
            .await
            .unwrap_or_else(|_| serde_json::json!({ "error": "upstream_error" }));
        return Err(AssistantUpstreamError::new(status, Some(body)));
    }

    Ok(resp)
}
