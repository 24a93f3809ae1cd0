//! Token payload decoding and expiry checks.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use thiserror::Error;

use herbwise_types::TokenClaims;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The token is not a dot-separated signed payload.
    #[error("malformed token: {0}")]
    Malformed(&'static str),
    #[error("token payload is not valid base64url")]
    Encoding(#[from] base64::DecodeError),
    /// The payload is not JSON, or lacks the required `exp` claim.
    #[error("token payload could not be parsed")]
    Payload(#[from] serde_json::Error),
}

/// Decode the claims out of a token without verifying its signature.
///
/// Signature verification belongs to the backend; the client only needs the
/// payload to decide whether the session is worth presenting at all.
pub fn decode_claims(token: &str) -> Result<TokenClaims, SessionError> {
    let mut segments = token.split('.');
    let _header = segments
        .next()
        .filter(|s| !s.is_empty())
        .ok_or(SessionError::Malformed("empty token"))?;
    let payload = segments
        .next()
        .ok_or(SessionError::Malformed("missing payload segment"))?;
    let raw = URL_SAFE_NO_PAD.decode(payload)?;
    let claims = serde_json::from_slice(&raw)?;
    Ok(claims)
}

/// Whether `token` proves a live session at instant `now`.
///
/// Absent and undecodable tokens are both simply invalid; decode failures are
/// logged and never surfaced to the caller.
#[must_use]
pub fn is_valid_at(token: Option<&str>, now: DateTime<Utc>) -> bool {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return false;
    };
    match decode_claims(token) {
        Ok(claims) => claims.exp > now.timestamp(),
        Err(error) => {
            tracing::warn!(%error, "rejecting undecodable session token");
            false
        }
    }
}

/// [`is_valid_at`] against the current wall clock.
#[must_use]
pub fn is_valid(token: Option<&str>) -> bool {
    is_valid_at(token, Utc::now())
}
