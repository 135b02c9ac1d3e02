// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token header, claims and the identity they carry.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Signing algorithm tag written into every token header.
pub const ALGORITHM: &str = "HS256";

/// Token type tag written into every token header.
pub const TOKEN_TYPE: &str = "JWT";

/// An already-authenticated user, as supplied by the caller at issuance.
///
/// The authority never looks identities up; whoever calls `issue` is
/// responsible for having checked the user's credentials first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    /// Numeric user id
    pub id: i64,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
}

impl Identity {
    pub fn new(id: i64, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
        }
    }
}

/// First token segment.
///
/// Field order is part of the wire format: it serializes to exactly
/// `{"alg":"HS256","typ":"JWT"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }
}

/// Second token segment: identity plus timing claims.
///
/// Serialized field order is `userId, email, name, iat, exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User id (`userId` on the wire)
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Build claims for `identity`, valid from `iat` for `ttl_secs` seconds.
    ///
    /// Returns `None` when `exp` would overflow.
    pub(crate) fn for_identity(identity: &Identity, iat: i64, ttl_secs: i64) -> Option<Self> {
        Some(Self {
            user_id: identity.id,
            email: identity.email.clone(),
            name: identity.name.clone(),
            iat,
            exp: iat.checked_add(ttl_secs)?,
        })
    }

    /// The identity embedded in these claims.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.user_id,
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }

    /// Lifetime the token was issued with.
    pub fn ttl_secs(&self) -> i64 {
        self.exp - self.iat
    }

    /// Whether the token is expired at `now` (`exp <= now`).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.user_id,
            email: claims.email,
            name: claims.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_identity() -> Identity {
        Identity::new(1, "a@b.com", "A")
    }

    #[test]
    fn header_serializes_without_whitespace() {
        let json = serde_json::to_string(&TokenHeader::default()).unwrap();
        assert_eq!(json, r#"{"alg":"HS256","typ":"JWT"}"#);
    }

    #[test]
    fn claims_serialize_in_wire_order() {
        let claims = Claims::for_identity(&sample_identity(), 1_700_000_000, 3600).unwrap();
        let json = serde_json::to_string(&claims).unwrap();
        assert_eq!(
            json,
            r#"{"userId":1,"email":"a@b.com","name":"A","iat":1700000000,"exp":1700003600}"#
        );
    }

    #[test]
    fn for_identity_rejects_overflowing_expiry() {
        assert!(Claims::for_identity(&sample_identity(), i64::MAX - 10, 3600).is_none());
    }

    #[test]
    fn identity_round_trips_through_claims() {
        let claims = Claims::for_identity(&sample_identity(), 100, 50).unwrap();
        assert_eq!(claims.identity(), sample_identity());
        assert_eq!(Identity::from(claims), sample_identity());
    }

    #[test]
    fn expiry_is_inclusive_of_now() {
        let claims = Claims::for_identity(&sample_identity(), 100, 50).unwrap();
        assert!(!claims.is_expired_at(149));
        assert!(claims.is_expired_at(150));
        assert!(claims.is_expired_at(151));
        assert_eq!(claims.ttl_secs(), 50);
    }
}
