//! `lw-leads` — typed client for the Leadwire CRM leads module.
//!
//! Provides the [`LeadsProvider`] trait that abstracts over the leads API,
//! a production REST implementation ([`RestLeadsClient`]), the pure
//! request-composition layer (permission scoping in [`scope`], query bodies
//! in [`query`]) and the normalizers that give backend list responses a
//! stable client-side shape ([`options`], [`hierarchy`]).
//!
//! Composition is pure and testable without a network; the REST layer adds
//! session validation, auth headers and error mapping on top.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use lw_domain::config::Config;
//! use lw_leads::types::{FilterOptions, PaginationParams, ScopeOverrides, User};
//! use lw_leads::{LeadsProvider, RestLeadsClient};
//! use lw_session::KeyringTokenStore;
//!
//! # async fn example() -> lw_domain::error::Result<()> {
//! let cfg = Config::default();
//! let store = Arc::new(KeyringTokenStore::new(&cfg.credentials));
//! let client = RestLeadsClient::new(&cfg, store)?;
//!
//! let user = User {
//!     id: "64a1f0c2".into(),
//!     role: "agent".into(),
//!     permissions: Default::default(),
//! };
//! let page = client
//!     .leads(
//!         &user,
//!         &FilterOptions::default(),
//!         "acme",
//!         PaginationParams::new(0, 20),
//!         &ScopeOverrides::default(),
//!     )
//!     .await?;
//!
//! println!("{} of {} leads", page.data.len(), page.total_leads);
//! # Ok(())
//! # }
//! ```

pub mod hierarchy;
pub mod options;
pub mod provider;
pub mod query;
pub mod rest;
pub mod scope;
pub mod types;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use hierarchy::{attach_non_assigned_if_permitted, to_tree};
pub use options::{tag_page, to_filter_options};
pub use provider::LeadsProvider;
pub use query::{compose_leads_request, DEFAULT_DATE_FOR, DEFAULT_SEARCH_BOX_FILTER};
pub use rest::{from_reqwest, RestLeadsClient};
pub use scope::resolve_scope;
pub use types::{
    AgentNode, CampaignLeadsRequest, CampaignLeadsResponse, CampaignPagination,
    CampaignsResponse, DataEnvelope, DateRange, FilterOption, FilterOptions, LeadsRequest,
    LeadsResponse, OptionRow, PaginationParams, Permissions, RequestScope, ScopeOverrides,
    StaffRow, TagPage, TagRow, TagsResponse, User,
};

use std::sync::Arc;

use lw_domain::config::Config;
use lw_domain::error::Result;
use lw_session::TokenStore;

/// Build the production [`LeadsProvider`] from config and a token store.
///
/// There is a single REST transport today; the factory exists so embedders
/// hold an `Arc<dyn LeadsProvider>` and tests can swap in a double.
pub fn create_provider(cfg: &Config, store: Arc<dyn TokenStore>) -> Result<Arc<dyn LeadsProvider>> {
    Ok(Arc::new(RestLeadsClient::new(cfg, store)?))
}
