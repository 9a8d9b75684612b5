//! Axum router construction.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/call", post(handlers::call))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::function::EnvelopeDecryptor;
    use crate::kms::MockKeyUnwrap;
    use axum::{body::Body, http::Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let cfg = Config {
            init_vector_string: "0102030405060708".into(),
            use_resource_principal: true,
            encrypted_password: "AAAA".into(),
            dek_ciphertext: "AAAA".into(),
            endpoint: "https://kms.example.test".into(),
            key_ocid: "ocid1.key.oc1..test".into(),
            kms_timeout_secs: 30,
            strict_decrypt: false,
            listen_port: 8080,
            log_level: "info".into(),
        };
        AppState::new(EnvelopeDecryptor::new(cfg, Arc::new(MockKeyUnwrap::new())))
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = build(test_state());
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn health_route_returns_200() {
        let app = build(test_state());
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn call_requires_post() {
        let app = build(test_state());
        let req = Request::builder()
            .uri("/call")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 405);
    }
}
