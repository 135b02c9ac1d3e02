// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token endpoints.
//!
//! Registration and login live with the user store; these handlers only need
//! the token authority.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{Auth, AuthError, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /v1/auth/refresh`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    /// Token to exchange (access or refresh)
    #[serde(default)]
    pub token: Option<String>,
}

/// A freshly issued access token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Exchange a still-valid token for a new access token.
#[utoipa::path(
    post,
    path = "/v1/auth/refresh",
    tag = "Auth",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = TokenResponse),
        (status = 400, description = "Body is not valid JSON or has no token"),
        (status = 401, description = "Token is invalid or expired")
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    request: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, Response> {
    let Json(request) = request.map_err(|e| {
        tracing::debug!(error = %e, "Rejected refresh request body");
        ApiError::bad_request("invalid JSON body").into_response()
    })?;

    let token = match request.token.as_deref() {
        Some(token) if !token.is_empty() => token,
        _ => return Err(ApiError::bad_request("token is required").into_response()),
    };

    match state.authority.refresh(token) {
        Ok(token) => Ok(Json(TokenResponse { token })),
        Err(e) if e.is_rejection() => Err(AuthError::from(e).into_response()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to issue refreshed token");
            Err(ApiError::internal("failed to issue token").into_response())
        }
    }
}

/// Claims of the token presented in the `Authorization` header.
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current token claims", body = Claims),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn me(Auth(claims): Auth) -> Json<Claims> {
    Json(claims)
}
