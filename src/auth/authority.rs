// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stateless HS256 token issuance and verification.
//!
//! ## Wire Format
//!
//! ```text
//! base64url(header) "." base64url(payload) "." base64url(HMAC-SHA256(secret, header "." payload))
//! ```
//!
//! All segments are unpadded base64url. The header is always
//! `{"alg":"HS256","typ":"JWT"}` and the payload carries
//! `userId, email, name, iat, exp`.
//!
//! ## Verification Order
//!
//! 1. Exactly three non-empty segments, else `Malformed`
//! 2. Signature over the first two segments, else `BadSignature`
//! 3. Payload decodes to claims, else `Malformed`
//! 4. `exp > now`, else `Expired`
//!
//! The payload is never parsed before its signature has been checked.
//!
//! ## Refresh
//!
//! `refresh` re-issues an access token for any token that still verifies.
//! Nothing is recorded, so the same refresh token can be presented again and
//! again until it expires. Rotating the secret invalidates every outstanding
//! token at once.

use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::claims::{Claims, Identity};
use super::secret::SigningSecret;
use super::TokenError;
use crate::config::AuthSettings;

type HmacSha256 = Hmac<Sha256>;

/// Default access token lifetime (1 hour).
pub const DEFAULT_ACCESS_TTL_SECS: u64 = 3600;

/// Default refresh token lifetime (7 days).
pub const DEFAULT_REFRESH_TTL_SECS: u64 = 60 * 60 * 24 * 7;

/// Authorization scheme prefix. Case-sensitive, single space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// base64url of `{"alg":"HS256","typ":"JWT"}`, shared by every token.
pub const HEADER_SEGMENT: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";

/// Current time in Unix seconds.
fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Strip the `Bearer ` scheme from an `Authorization` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix(BEARER_PREFIX)
}

/// Issues and verifies bearer tokens with a single process-wide secret.
///
/// Holds no mutable state, so one instance can be shared behind an `Arc`
/// by any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct TokenAuthority {
    secret: SigningSecret,
    default_ttl: u64,
    refresh_ttl: u64,
}

impl TokenAuthority {
    pub fn new(secret: SigningSecret, default_ttl: u64, refresh_ttl: u64) -> Self {
        Self {
            secret,
            default_ttl,
            refresh_ttl,
        }
    }

    /// Build an authority from loaded startup settings.
    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.secret.clone(),
            settings.access_ttl_secs,
            settings.refresh_ttl_secs,
        )
    }

    /// Lifetime used for access tokens and for `refresh`.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Lifetime used for refresh tokens.
    pub fn refresh_ttl(&self) -> u64 {
        self.refresh_ttl
    }

    // =========================================================================
    // Issuance
    // =========================================================================

    /// Issue a token for `identity` that lives for `ttl_secs` seconds.
    pub fn issue(&self, identity: &Identity, ttl_secs: u64) -> Result<String, TokenError> {
        self.issue_at(identity, ttl_secs, now())
    }

    /// Issue a short-lived access token.
    pub fn issue_access_token(&self, identity: &Identity) -> Result<String, TokenError> {
        self.issue(identity, self.default_ttl)
    }

    /// Issue a long-lived refresh token.
    pub fn issue_refresh_token(&self, identity: &Identity) -> Result<String, TokenError> {
        self.issue(identity, self.refresh_ttl)
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        identity: &Identity,
        ttl_secs: u64,
        now: i64,
    ) -> Result<String, TokenError> {
        if ttl_secs == 0 {
            return Err(TokenError::InvalidTtl);
        }
        let ttl = i64::try_from(ttl_secs).map_err(|_| TokenError::InvalidTtl)?;
        let claims = Claims::for_identity(identity, now, ttl).ok_or(TokenError::InvalidTtl)?;

        let payload_segment = Base64UrlUnpadded::encode_string(&serde_json::to_vec(&claims)?);
        let signing_input = format!("{HEADER_SEGMENT}.{payload_segment}");
        let signature = self.sign(signing_input.as_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Verify a bare token string and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, now())
    }

    /// Verify a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let result = self.check(token, now);
        if let Err(ref e) = result {
            tracing::debug!(reason = e.reason(), "Token verification failed");
        }
        result
    }

    fn check(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        let &[header, payload, signature] = segments.as_slice() else {
            return Err(TokenError::Malformed);
        };
        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(TokenError::Malformed);
        }

        let signing_input = &token[..header.len() + 1 + payload.len()];
        self.check_signature(signing_input.as_bytes(), signature)?;

        let payload_json =
            Base64UrlUnpadded::decode_vec(payload).map_err(|_| TokenError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&payload_json).map_err(|_| TokenError::Malformed)?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Verify the value of an `Authorization` header.
    ///
    /// A missing header, a missing or miscased `Bearer ` prefix and an invalid
    /// token all collapse to `None`.
    pub fn verify_authorization_header(&self, header_value: Option<&str>) -> Option<Identity> {
        self.verify_authorization_header_at(header_value, now())
    }

    pub fn verify_authorization_header_at(
        &self,
        header_value: Option<&str>,
        now: i64,
    ) -> Option<Identity> {
        let token = bearer_token(header_value?)?;
        self.verify_at(token, now).ok().map(Identity::from)
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Exchange a still-valid token for a fresh access token.
    ///
    /// The new token always uses the access lifetime, whatever lifetime the
    /// presented token was issued with.
    pub fn refresh(&self, token: &str) -> Result<String, TokenError> {
        self.refresh_at(token, now())
    }

    pub fn refresh_at(&self, token: &str, now: i64) -> Result<String, TokenError> {
        let claims = self.verify_at(token, now)?;
        self.issue_at(&claims.identity(), self.default_ttl, now)
    }

    // =========================================================================
    // Signing
    // =========================================================================

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.secret.as_bytes()).expect("HMAC can take key of any size")
    }

    fn sign(&self, signing_input: &[u8]) -> String {
        let mut mac = self.mac();
        mac.update(signing_input);
        Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes())
    }

    fn check_signature(&self, signing_input: &[u8], signature: &str) -> Result<(), TokenError> {
        let provided =
            Base64UrlUnpadded::decode_vec(signature).map_err(|_| TokenError::BadSignature)?;

        // Only the canonical encoding of a digest is accepted.
        if Base64UrlUnpadded::encode_string(&provided) != signature {
            return Err(TokenError::BadSignature);
        }

        let mut mac = self.mac();
        mac.update(signing_input);
        mac.verify_slice(&provided).map_err(|_| TokenError::BadSignature)
    }
}
