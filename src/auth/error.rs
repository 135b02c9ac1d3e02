// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token and authentication errors.
//!
//! `TokenError` keeps the precise rejection reason for logging. `AuthError` is
//! what crosses the HTTP boundary, and every variant renders the same
//! `401 Unauthorized` body so clients cannot tell a bad signature from an
//! expired token.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors produced while issuing or verifying a token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Wrong segment count, bad base64url, or unparseable payload JSON
    #[error("token is malformed")]
    Malformed,

    /// Signature does not match header and payload
    #[error("token signature is invalid")]
    BadSignature,

    /// Signature is valid but `exp` is not in the future
    #[error("token has expired")]
    Expired,

    /// TTL was zero or pushed `exp` past the representable range
    #[error("token lifetime must be between 1 second and the maximum timestamp")]
    InvalidTtl,

    #[error("failed to encode token segment: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl TokenError {
    /// Short machine-readable reason, for logs only.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::BadSignature => "bad_signature",
            TokenError::Expired => "expired",
            TokenError::InvalidTtl => "invalid_ttl",
            TokenError::Encoding(_) => "encoding",
        }
    }

    /// Whether this is a verification outcome rather than an issuance failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::Malformed | TokenError::BadSignature | TokenError::Expired
        )
    }
}

/// Authentication failure at the HTTP boundary.
#[derive(Debug)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Header present but not `Bearer <token>`
    InvalidAuthHeader,
    /// Token failed verification
    InvalidToken(TokenError),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: &'static str,
    error_code: &'static str,
}

impl AuthError {
    /// Internal reason, for logs. Never sent to clients.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::InvalidToken(e) => e.reason(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::InvalidToken(e) => write!(f, "Invalid token: {e}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::InvalidToken(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(AuthErrorBody {
            error: "Unauthorized",
            error_code: "unauthorized",
        });
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: AuthError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body_bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn every_failure_renders_identically() {
        let expected = r#"{"error":"Unauthorized","error_code":"unauthorized"}"#;

        for err in [
            AuthError::MissingAuthHeader,
            AuthError::InvalidAuthHeader,
            AuthError::InvalidToken(TokenError::Malformed),
            AuthError::InvalidToken(TokenError::BadSignature),
            AuthError::InvalidToken(TokenError::Expired),
        ] {
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, expected);
        }
    }

    #[test]
    fn reasons_stay_distinct_internally() {
        assert_eq!(TokenError::Malformed.reason(), "malformed");
        assert_eq!(TokenError::BadSignature.reason(), "bad_signature");
        assert_eq!(TokenError::Expired.reason(), "expired");
        assert_eq!(
            AuthError::from(TokenError::Expired).reason(),
            "expired"
        );
    }

    #[test]
    fn issuance_errors_are_not_rejections() {
        assert!(TokenError::Expired.is_rejection());
        assert!(!TokenError::InvalidTtl.is_rejection());
    }
}
