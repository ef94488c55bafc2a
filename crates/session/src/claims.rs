//! Session token payload decoding.
//!
//! The stored token is a three-part signed token; only the middle segment
//! is read here (base64url JSON). The signature is never verified on the
//! client (the backend is the authority), so decoding is exactly: split,
//! base64url-decode, parse JSON, require `exp`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

use lw_domain::error::{Error, Result};

/// Claims carried in the token payload. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Expiry as epoch seconds. The only field validation depends on.
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub sub: Option<String>,
}

/// Decode the payload segment of a stored session token.
///
/// Every failure maps to [`Error::Auth`]: a token that cannot be decoded
/// cannot back a session and is treated as invalid by the caller.
pub fn decode(token: &str) -> Result<TokenClaims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(Error::Auth("session token is not a three-part token".into()));
    }

    // Some emitters pad the segment even though the format says not to.
    let payload = parts[1].trim_end_matches('=');
    let raw = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| Error::Auth(format!("token payload is not base64url: {e}")))?;

    serde_json::from_slice(&raw)
        .map_err(|e| Error::Auth(format!("token payload is not valid claims JSON: {e}")))
}
