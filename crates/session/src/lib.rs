//! `lw-session` — stored-session handling for leadwire clients.
//!
//! Owns the token storage capability ([`TokenStore`]: get/set/delete, OS
//! keychain in production, in-memory for tests and embedders), payload
//! decoding for the three-part session token, the local expiry check
//! ([`SessionValidator`], the gate in front of every network call), and
//! the fixed transport header set ([`build_auth_context`]).
//!
//! Validation is purely local: no network I/O, no token refresh. An expired
//! or malformed token is deleted from storage, never renewed.

pub mod auth;
pub mod claims;
pub mod store;
pub mod validator;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use auth::{build_auth_context, AuthContext, CLIENT_USER_AGENT};
pub use claims::TokenClaims;
pub use store::{KeyringTokenStore, MemoryTokenStore, TokenStore};
pub use validator::{SessionState, SessionValidator};
