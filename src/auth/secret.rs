// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HMAC signing key.

use std::fmt;

/// Process-wide symmetric key used to sign and verify tokens.
///
/// Loaded once at startup and never mutated. `Debug` output is redacted so the
/// key cannot leak through logs.
#[derive(Clone)]
pub struct SigningSecret {
    key: Vec<u8>,
}

impl SigningSecret {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

impl From<&str> for SigningSecret {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for SigningSecret {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningSecret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let secret = SigningSecret::from("super-secret-value");
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("super-secret-value"));
        assert_eq!(rendered, "SigningSecret([REDACTED])");
    }

    #[test]
    fn exposes_raw_bytes() {
        let secret = SigningSecret::from(String::from("abc"));
        assert_eq!(secret.as_bytes(), b"abc");
        assert!(!secret.is_empty());
        assert!(SigningSecret::new(Vec::new()).is_empty());
    }
}
