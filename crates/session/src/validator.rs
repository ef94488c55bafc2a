//! Local session validation.
//!
//! [`SessionValidator::check`] is the gate in front of every network call:
//! read the stored token, decode its payload, compare `exp` against the
//! wall clock. No network I/O and no caching: a token can be invalidated
//! out-of-band between calls, so every fetch re-checks.

use std::sync::Arc;

use chrono::Utc;

use lw_domain::trace::TraceEvent;

use crate::claims::{self, TokenClaims};
use crate::store::TokenStore;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session state
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Outcome of a session check.
///
/// The non-`Valid` states carry the reason so the caller can surface a
/// user-visible notice; on `Expired`/`Malformed` the stored token has
/// already been deleted.
#[derive(Debug, Clone)]
pub enum SessionState {
    Valid { token: String, claims: TokenClaims },
    Missing,
    Expired,
    Malformed,
}

impl SessionState {
    /// The dismissable notice to show the user, if any.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            SessionState::Valid { .. } => None,
            SessionState::Missing => Some("You are not signed in."),
            SessionState::Expired => Some("Your session has expired. Please sign in again."),
            SessionState::Malformed => {
                Some("Your session is no longer valid. Please sign in again.")
            }
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Validator
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Validates the stored session against the injected [`TokenStore`].
#[derive(Clone)]
pub struct SessionValidator {
    store: Arc<dyn TokenStore>,
}

impl SessionValidator {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Check the stored session.
    ///
    /// The only side effect is deleting the stored token on the
    /// expired/malformed paths. A storage read failure is reported as
    /// `Missing` (logged), not an error.
    pub fn check(&self) -> SessionState {
        let token = match self.store.get() {
            Ok(Some(t)) => t,
            Ok(None) => return SessionState::Missing,
            Err(e) => {
                tracing::warn!(error = %e, "token storage read failed");
                return SessionState::Missing;
            }
        };

        let claims = match claims::decode(&token) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, "stored session token is malformed, discarding");
                self.discard("malformed");
                return SessionState::Malformed;
            }
        };

        if is_expired(&claims, Utc::now().timestamp()) {
            self.discard("expired");
            return SessionState::Expired;
        }

        SessionState::Valid { token, claims }
    }

    /// `true` when the stored session can back a request right now.
    pub fn is_valid(&self) -> bool {
        matches!(self.check(), SessionState::Valid { .. })
    }

    fn discard(&self, reason: &str) {
        if let Err(e) = self.store.delete() {
            tracing::warn!(error = %e, reason, "failed to delete invalid session token");
        }
        TraceEvent::SessionInvalidated {
            reason: reason.to_owned(),
        }
        .emit();
    }
}

/// Strict comparison on floored epoch seconds: expired only once the
/// current second is past `exp`; `exp == now` is still valid.
pub fn is_expired(claims: &TokenClaims, now: i64) -> bool {
    now > claims.exp
}
