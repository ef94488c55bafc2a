//! Data Transfer Objects for the Leadwire CRM leads endpoints.
//!
//! Field names use `camelCase` on the wire (matching the Node backend) and
//! `snake_case` in Rust code via `#[serde(rename_all = "camelCase")]`.
//! The handful of exceptions (`userid`, `_id`) carry explicit renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Identity & permissions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Role granting unrestricted lead visibility.
pub const ROLE_SUPER_ADMIN: &str = "superAdmin";
/// Lead-module capability: see every lead.
pub const CAP_VIEW_ALL: &str = "view_all";
/// Lead-module capability: see leads not assigned to any agent.
pub const CAP_VIEW_NON_ASSIGNED: &str = "view_non_assigned";

/// Sentinel agent id standing for "leads with no assignee".
pub const NON_ASSIGNED_VALUE: &str = "non-assigned";
/// Display name for the sentinel agent entry.
pub const NON_ASSIGNED_LABEL: &str = "Non Assigned";

/// The signed-in user as the backend describes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub permissions: Permissions,
}

/// Per-module capability grants. Capabilities are plain strings so that
/// grants added server-side round-trip without a client release.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub lead: HashSet<String>,
}

impl User {
    pub fn is_super_admin(&self) -> bool {
        self.role == ROLE_SUPER_ADMIN
    }

    pub fn has_lead_capability(&self, capability: &str) -> bool {
        self.permissions.lead.contains(capability)
    }

    /// Whether this user may see leads that have no assigned agent.
    pub fn can_view_non_assigned(&self) -> bool {
        self.is_super_admin()
            || self.has_lead_capability(CAP_VIEW_ALL)
            || self.has_lead_capability(CAP_VIEW_NON_ASSIGNED)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Filter state & pagination
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The filters a caller has picked in the leads screen. Everything is
/// optional; [`compose_leads_request`](crate::query::compose_leads_request)
/// fills in the wire defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Which searchable fields the free-text term applies to.
    /// `None` falls back to the lead-info default; an explicit empty list
    /// is sent as-is.
    #[serde(default)]
    pub search_box_filters: Option<Vec<String>>,
    #[serde(default)]
    pub selected_agents: Vec<String>,
    #[serde(default)]
    pub selected_statuses: Vec<String>,
    #[serde(default)]
    pub selected_sources: Vec<String>,
    #[serde(default)]
    pub selected_tags: Vec<String>,
    #[serde(default)]
    pub date_range: DateRange,
    /// Which timestamp the date range filters on. `None` falls back to
    /// creation time.
    #[serde(default)]
    pub date_for: Option<String>,
}

/// Half-open or closed creation/activity window. Either end may be unset.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

/// Zero-based page cursor. Every wire use converts to the backend's
/// one-based numbering via [`wire_page`](Self::wire_page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page: u32,
    pub limit: u32,
}

impl PaginationParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// One-based page number as every endpoint expects it.
    pub fn wire_page(&self) -> u32 {
        self.page + 1
    }

    /// Absolute index of the first row on this page.
    pub fn offset(&self) -> usize {
        self.page as usize * self.limit as usize
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Visibility scope
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The resolved visibility scope attached to a leads query. Produced by
/// [`resolve_scope`](crate::scope::resolve_scope), adjustable per call via
/// [`ScopeOverrides`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestScope {
    pub selected_agents: Vec<String>,
    pub include_non_assigned: bool,
    pub view_all_leads: bool,
}

/// Per-request replacements for individual scope fields. A `Some` wins over
/// the computed value; `None` leaves it alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_agents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_non_assigned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_all_leads: Option<bool>,
}

impl ScopeOverrides {
    /// Apply each override the caller set explicitly.
    pub fn apply(&self, scope: &mut RequestScope) {
        if let Some(agents) = &self.selected_agents {
            scope.selected_agents = agents.clone();
        }
        if let Some(include) = self.include_non_assigned {
            scope.include_non_assigned = include;
        }
        if let Some(view_all) = self.view_all_leads {
            scope.view_all_leads = view_all;
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Lead search
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// POST /api/Lead/get — request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadsRequest {
    pub search_term: String,
    pub search_box_filters: Vec<String>,
    pub selected_agents: Vec<String>,
    pub selected_statuses: Vec<String>,
    pub selected_sources: Vec<String>,
    pub selected_tags: Vec<String>,
    /// Zero, one or two ISO-8601 instants (millisecond precision, `Z`
    /// suffix). Empty means no date filter.
    pub date: Vec<String>,
    pub date_for: String,
    /// One-based on the wire.
    pub page: u32,
    /// The backend parses this field from a string, not a number.
    pub limit: String,
    /// Caller identity; always sent regardless of scope. Lowercase on the
    /// wire, unlike every other key.
    #[serde(rename = "userid")]
    pub userid: String,
    pub include_non_assigned: bool,
    pub view_all_leads: bool,
}

/// POST /api/Lead/get — response body. Lead rows stay untyped; their shape
/// belongs to the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadsResponse {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    #[serde(default)]
    pub total_leads: u64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Filter option lists (statuses, sources, tags)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Generic `{ "data": [...] }` list envelope used by the option endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default)]
    pub data: Vec<T>,
}

/// Backend row shared by GET /api/Status/get and GET /api/Source/get.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionRow {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A picker entry as the UI consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// GET /api/tags/get — row. Tags have no id of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRow {
    pub name: String,
}

/// GET /api/tags/get — response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsResponse {
    #[serde(default)]
    pub data: Vec<TagRow>,
    /// Preferred total field; `total` is the legacy spelling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tags: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// One normalized page of tag options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagPage {
    pub options: Vec<FilterOption>,
    pub has_more: bool,
    pub total_count: u64,
}

impl TagPage {
    /// The degraded result when a tag fetch fails.
    pub fn empty() -> Self {
        Self {
            options: Vec::new(),
            has_more: false,
            total_count: 0,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Agent hierarchy
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// GET /api/staff/get?preserveHierarchy=true — row. Subordinates nest
/// recursively to arbitrary depth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRow {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_email_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subordinates: Option<Vec<StaffRow>>,
}

/// One node of the agent picker tree. `title` and `label` both carry the
/// display name because downstream pickers read one or the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentNode {
    pub value: String,
    pub title: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_email_verified: Option<bool>,
    /// Absent (not empty) on leaves; the picker reads absence as
    /// "not expandable".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<AgentNode>>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Campaigns
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// POST /api/Lead/campaign — request body. Unlike the lead search, `limit`
/// travels as a number here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignLeadsRequest {
    pub campaign_name: String,
    /// One-based on the wire.
    pub page: u32,
    pub limit: u32,
}

/// POST /api/Lead/campaign — response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignLeadsResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    #[serde(default)]
    pub total_leads: u64,
}

/// GET /api/campaigns/with-counts — response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignsResponse {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<CampaignPagination>,
}

/// Pagination block the campaign list returns alongside its rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
}
