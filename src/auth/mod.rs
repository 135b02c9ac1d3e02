// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless bearer tokens for the Todo API.
//!
//! ## Auth Flow
//!
//! 1. A caller checks the user's credentials (see `password`)
//! 2. `TokenAuthority::issue` turns the resulting `Identity` into a signed token
//! 3. The client sends `Authorization: Bearer <token>` on later requests
//! 4. The `Auth` extractor verifies the token and hands the claims to the handler
//!
//! ## Security
//!
//! - Tokens are HS256-signed with one process-wide secret
//! - The signature is checked before the payload is parsed
//! - Verification failures all map to one `401` response shape
//! - There is no revocation list; tokens die by expiry or secret rotation

pub mod authority;
pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod secret;

pub use authority::TokenAuthority;
pub use claims::{Claims, Identity, TokenHeader};
pub use error::{AuthError, TokenError};
pub use extractor::Auth;
pub use secret::SigningSecret;
