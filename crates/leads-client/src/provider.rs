//! The `LeadsProvider` trait defines the interface for all leads-module
//! backends (REST, mock/test).

use async_trait::async_trait;
use lw_domain::error::Result;

use crate::types::{
    AgentNode, CampaignLeadsResponse, CampaignsResponse, FilterOption, FilterOptions,
    LeadsResponse, PaginationParams, ScopeOverrides, TagPage, User,
};

/// Abstraction over the leads-module API surface.
///
/// Read paths split in two tiers. List/navigation endpoints propagate
/// errors through `lw_domain::error::Result`. Filter-option lookups are
/// best-effort and degrade to empty results, so a broken picker never
/// blocks the leads screen itself.
#[async_trait]
pub trait LeadsProvider: Send + Sync {
    /// Search leads for the signed-in user (POST /api/Lead/get).
    async fn leads(
        &self,
        user: &User,
        filters: &FilterOptions,
        search_text: &str,
        pagination: PaginationParams,
        overrides: &ScopeOverrides,
    ) -> Result<LeadsResponse>;

    /// Status picker options (GET /api/Status/get). Best-effort.
    async fn statuses(&self) -> Vec<FilterOption>;

    /// Source picker options (GET /api/Source/get). Best-effort.
    async fn sources(&self) -> Vec<FilterOption>;

    /// One page of tag options (GET /api/tags/get). Best-effort.
    async fn tags(&self, pagination: PaginationParams, search: Option<&str>) -> TagPage;

    /// The agent picker tree with the synthetic non-assigned entry when the
    /// user may see it (GET /api/staff/get?preserveHierarchy=true).
    /// Best-effort.
    async fn agent_tree(&self, user: &User) -> Vec<AgentNode>;

    /// Leads belonging to one campaign (POST /api/Lead/campaign).
    async fn campaign_leads(
        &self,
        campaign_name: &str,
        pagination: PaginationParams,
    ) -> Result<CampaignLeadsResponse>;

    /// Campaign list with lead counts, most leads first
    /// (GET /api/campaigns/with-counts). Raced against a fixed 30-second
    /// deadline.
    async fn campaigns(&self, pagination: PaginationParams) -> Result<CampaignsResponse>;
}
