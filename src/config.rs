// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the loaders that turn them into
//! typed settings. Configuration is read once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | HMAC key for signing tokens | Required (dev builds fall back with a warning) |
//! | `JWT_EXPIRES_IN` | Access token lifetime in seconds | `3600` |
//! | `JWT_REFRESH_EXPIRES_IN` | Refresh token lifetime in seconds | `604800` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;

use crate::auth::authority::{DEFAULT_ACCESS_TTL_SECS, DEFAULT_REFRESH_TTL_SECS};
use crate::auth::SigningSecret;

/// HMAC signing key. Rotating it invalidates every issued token.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Access token lifetime in seconds.
pub const JWT_EXPIRES_IN_ENV: &str = "JWT_EXPIRES_IN";

/// Refresh token lifetime in seconds.
pub const JWT_REFRESH_EXPIRES_IN_ENV: &str = "JWT_REFRESH_EXPIRES_IN";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Secret used by `dev` builds when `JWT_SECRET` is unset.
#[cfg(feature = "dev")]
pub const DEV_FALLBACK_SECRET: &str = "default-secret-change-in-production";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set")]
    MissingSecret,

    #[error("JWT_SECRET must not be empty")]
    EmptySecret,

    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTtl(&'static str),
}

// =============================================================================
// Auth Settings
// =============================================================================

/// Token authority settings.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub secret: SigningSecret,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
}

impl AuthSettings {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = match lookup(JWT_SECRET_ENV) {
            Some(value) if value.is_empty() => return Err(ConfigError::EmptySecret),
            Some(value) => SigningSecret::from(value),
            None => missing_secret()?,
        };

        let access_ttl_secs = parse_ttl(&lookup, JWT_EXPIRES_IN_ENV, DEFAULT_ACCESS_TTL_SECS)?;
        let refresh_ttl_secs =
            parse_ttl(&lookup, JWT_REFRESH_EXPIRES_IN_ENV, DEFAULT_REFRESH_TTL_SECS)?;

        Ok(Self {
            secret,
            access_ttl_secs,
            refresh_ttl_secs,
        })
    }
}

#[cfg(not(feature = "dev"))]
fn missing_secret() -> Result<SigningSecret, ConfigError> {
    Err(ConfigError::MissingSecret)
}

#[cfg(feature = "dev")]
fn missing_secret() -> Result<SigningSecret, ConfigError> {
    tracing::warn!(
        "{JWT_SECRET_ENV} is not set, using the development fallback secret. Do not deploy this build."
    );
    Ok(SigningSecret::from(DEV_FALLBACK_SECRET))
}

fn parse_ttl(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    let ttl: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: raw.clone(),
    })?;
    if ttl == 0 {
        return Err(ConfigError::ZeroTtl(var));
    }
    Ok(ttl)
}

// =============================================================================
// Server Settings
// =============================================================================

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Parse `LOG_FORMAT`; anything other than `json` is pretty.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(HOST_ENV).unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = match lookup(PORT_ENV) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                var: PORT_ENV,
                value: raw.clone(),
            })?,
            None => 8080,
        };
        let log_format = lookup(LOG_FORMAT_ENV)
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            log_format,
        })
    }

    /// Socket address to bind, if `host:port` parses.
    pub fn bind_addr(&self) -> Option<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().ok()
    }
}
