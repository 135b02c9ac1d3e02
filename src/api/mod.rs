// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{Claims, Identity},
    state::AppState,
};

pub mod auth;
pub mod health;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/me", get(auth::me))
        .with_state(state);

    Router::new()
        .route("/health/live", get(health::liveness))
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(health::liveness, auth::refresh, auth::me),
    components(
        schemas(
            Claims,
            Identity,
            auth::RefreshRequest,
            auth::TokenResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Auth", description = "Bearer token refresh and inspection")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{SigningSecret, TokenAuthority};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    const UNAUTHORIZED_BODY: &str = r#"{"error":"Unauthorized","error_code":"unauthorized"}"#;

    fn test_state() -> AppState {
        AppState::new(TokenAuthority::new(
            SigningSecret::from("router-test-secret"),
            3600,
            604_800,
        ))
    }

    fn identity() -> Identity {
        Identity::new(1, "a@b.com", "A")
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn refresh_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/auth/refresh")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn liveness_returns_ok() {
        let response = router(test_state())
            .oneshot(Request::get("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn refresh_returns_new_token_for_same_identity() {
        let state = test_state();
        let old = state.authority.issue_refresh_token(&identity()).unwrap();

        let response = router(state.clone())
            .oneshot(refresh_request(&format!(r#"{{"token":"{old}"}}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: auth::TokenResponse = serde_json::from_str(&body_string(response).await).unwrap();
        let claims = state.authority.verify(&body.token).unwrap();
        assert_eq!(claims.identity(), identity());
        assert_eq!(claims.ttl_secs(), 3600);
    }

    #[tokio::test]
    async fn refresh_rejects_invalid_token_uniformly() {
        let response = router(test_state())
            .oneshot(refresh_request(r#"{"token":"invalid.token.here"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, UNAUTHORIZED_BODY);
    }

    #[tokio::test]
    async fn refresh_requires_token() {
        for body in ["{}", r#"{"token":""}"#] {
            let response = router(test_state())
                .oneshot(refresh_request(body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn refresh_answers_unreadable_bodies_with_json_400() {
        let wrong_type = refresh_request(r#"{"token":5}"#);
        let not_json = refresh_request("token=abc");
        let no_content_type = Request::builder()
            .method("POST")
            .uri("/v1/auth/refresh")
            .body(Body::from(r#"{"token":"abc"}"#))
            .unwrap();

        for request in [wrong_type, not_json, no_content_type] {
            let response = router(test_state()).oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_string(response).await, r#"{"error":"invalid JSON body"}"#);
        }
    }

    #[tokio::test]
    async fn me_returns_claims_for_bearer_token() {
        let state = test_state();
        let token = state.authority.issue_access_token(&identity()).unwrap();

        let response = router(state)
            .oneshot(
                Request::get("/v1/auth/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let claims: Claims = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(claims.identity(), identity());
    }

    #[tokio::test]
    async fn me_without_token_is_unauthorized() {
        let response = router(test_state())
            .oneshot(Request::get("/v1/auth/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, UNAUTHORIZED_BODY);
    }
}
