use axum::{extract::Request, http::header, middleware::Next, response::Response};

use crate::services::auth_service;

// Tokens are opaque strings. The participant gate only checks that a bearer
// token is present; the admin gate compares it against the two known tokens.

#[derive(Clone, Debug)]
pub struct AuthenticatedCaller {
    pub token: String,
}

#[derive(Clone, Debug)]
pub struct AdminContext {
    pub role: &'static str,
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn unauthorized() -> Response {
    Response::builder()
        .status(401)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(r#"{"error":"unauthorized"}"#))
        .unwrap()
}

pub async fn require_auth(mut request: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(&request) {
        request.extensions_mut().insert(AuthenticatedCaller { token });
        return next.run(request).await;
    }
    unauthorized()
}

pub async fn require_admin(mut request: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(&request) {
        if let Some(role) = auth_service::resolve_admin_role(&token) {
            request.extensions_mut().insert(AdminContext { role });
            return next.run(request).await;
        }
    }
    unauthorized()
}
