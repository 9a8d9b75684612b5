//! Axum request handlers for the function endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::function::DecryptError;
use crate::protocol::{ErrorResponse, HealthResponse};

use super::state::AppState;

/// `POST /call` — the function invocation.
///
/// Runs the envelope decryption and returns
/// `{"decryptedPassword": "<string-or-null>"}`. The null case is a *success*:
/// the remote unwrap worked but the local decrypt did not. A remote unwrap
/// failure is the invocation failing, surfaced as 502.
pub async fn call(State(state): State<AppState>) -> Response {
    match state.decryptor.decrypt_sensitive_value().await {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(DecryptError::Unwrap(e)) => {
            warn!(error = %e, "remote key unwrap failed");
            let err = ErrorResponse::new("upstream_error", "KMS key unwrap failed");
            (StatusCode::BAD_GATEWAY, Json(err)).into_response()
        }
        Err(DecryptError::Cipher(e)) => {
            // Only reachable in strict mode; lenient mode answers 200 + null.
            warn!(error = %e, "local decrypt failed");
            let err = ErrorResponse::new("internal_error", "local decrypt failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
        }
    }
}

/// `GET /health` — liveness check.
///
/// State is fully constructed before the listener binds, so a served request
/// is proof of readiness.
pub async fn health() -> Response {
    let body = HealthResponse {
        status: "ok".into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}
