//! Transport auth context.
//!
//! The backend authenticates requests with a cookie-bound token plus a
//! fixed set of client-identification headers. The set is a wire contract:
//! header names and static values never vary per call, only the embedded
//! token does.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE, ORIGIN, REFERER, USER_AGENT,
};

use lw_domain::config::ApiConfig;
use lw_domain::error::{Error, Result};

use crate::store::TokenStore;

/// Fixed client identification sent with every request.
pub const CLIENT_USER_AGENT: &str = "Mozilla/5.0 (compatible; LeadwireMobile/0.1)";

/// The complete header set for one authenticated request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub headers: HeaderMap,
}

/// Assemble the auth header set from the stored token and the configured
/// base URL.
///
/// Fails with [`Error::Auth`] when no token is stored. Expiry is *not*
/// checked here; that is [`crate::SessionValidator`]'s job, and callers
/// are expected to validate first.
pub fn build_auth_context(store: &dyn TokenStore, api: &ApiConfig) -> Result<AuthContext> {
    let token = store
        .get()?
        .ok_or_else(|| Error::Auth("no session token stored".into()))?;

    let base = api.base_url.trim_end_matches('/');

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        COOKIE,
        HeaderValue::from_str(&format!("token={token}"))
            .map_err(|_| Error::Auth("session token contains non-header characters".into()))?,
    );
    headers.insert(
        REFERER,
        HeaderValue::from_str(&format!("{base}/"))
            .map_err(|e| Error::Config(format!("api.base_url as referer: {e}")))?,
    );
    headers.insert(
        ORIGIN,
        HeaderValue::from_str(&origin_of(base)?)
            .map_err(|e| Error::Config(format!("api.base_url as origin: {e}")))?,
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );

    Ok(AuthContext { headers })
}

/// `scheme://host[:port]` of the configured base URL (default ports elided).
fn origin_of(base_url: &str) -> Result<String> {
    let parsed =
        url::Url::parse(base_url).map_err(|e| Error::Config(format!("api.base_url: {e}")))?;
    Ok(parsed.origin().ascii_serialization())
}
