// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Todo Auth - Stateless Bearer Token Service
//!
//! Issues and verifies HS256-signed bearer tokens for the Todo API. A token
//! carries the user's id, email and name plus `iat`/`exp`, and verifying it
//! needs nothing but the process secret.
//!
//! ## Modules
//!
//! - `api` - HTTP handlers (Axum)
//! - `auth` - Token authority, extractor and password hashing
//! - `config` - Environment configuration
//! - `state` - Shared application state

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;
