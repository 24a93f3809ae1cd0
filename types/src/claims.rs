//! Token payload claims.

use serde::Deserialize;

/// Claims carried by a session token payload.
///
/// Only `exp` is required; the identity claims are present on tokens issued
/// by the auth backend but nothing in the gating logic depends on them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Expiration instant, seconds since the Unix epoch.
    pub exp: i64,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl TokenClaims {
    /// The identity portion of the claims, for display surfaces.
    #[must_use]
    pub fn user(&self) -> UserClaims {
        UserClaims {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Identity claims extracted from a token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserClaims {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}
