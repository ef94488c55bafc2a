//! `lw-domain` — shared foundation for the leadwire crates.
//!
//! Holds the config tree (TOML, serde defaults), the workspace-wide
//! [`error::Error`] enum, and the structured [`trace::TraceEvent`]s that
//! every crate emits through `tracing`.

pub mod config;
pub mod error;
pub mod trace;
