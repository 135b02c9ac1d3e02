// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenAuthority;

/// Shared handles built once at startup and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub authority: Arc<TokenAuthority>,
}

impl AppState {
    pub fn new(authority: TokenAuthority) -> Self {
        Self {
            authority: Arc::new(authority),
        }
    }
}
