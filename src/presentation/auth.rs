use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::presentation::handlers::error_response;
use crate::presentation::state::AppState;

/// Rejects requests whose `Authorization` header is not `Bearer <configured token>`.
pub async fn require_bearer_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match presented {
        Some(token) if token_matches(token, &state.bearer_token) => next.run(request).await,
        _ => {
            tracing::warn!("Rejected request with missing or invalid bearer token");
            error_response(StatusCode::UNAUTHORIZED, "Invalid authorization token")
        }
    }
}

fn token_matches(presented: &str, expected: &str) -> bool {
    if expected.is_empty() || presented.len() != expected.len() {
        return false;
    }
    // compare every byte regardless of where the first mismatch is
    presented
        .bytes()
        .zip(expected.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
