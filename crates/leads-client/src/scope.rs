//! Permission-based visibility scoping for lead queries.

use crate::types::{RequestScope, User, NON_ASSIGNED_VALUE};

/// Resolve which leads a query may see from the user's role, capability
/// grants and explicit agent selection.
///
/// Priority order, first match wins:
///
/// 1. a non-empty selection is honored verbatim, even for a superAdmin;
/// 2. a superAdmin with no selection defers scoping to the backend
///    (`viewAllLeads` and nothing else);
/// 3. everyone else is pinned to their own leads.
///
/// When the selection contains the [`NON_ASSIGNED_VALUE`] sentinel,
/// `includeNonAssigned` is raised, and `viewAllLeads` with it only if the
/// user actually holds a grant wide enough to see unassigned leads.
pub fn resolve_scope(user: &User, selected_agents: &[String]) -> RequestScope {
    if !selected_agents.is_empty() {
        let include_non_assigned = selected_agents.iter().any(|a| a == NON_ASSIGNED_VALUE);
        return RequestScope {
            selected_agents: selected_agents.to_vec(),
            include_non_assigned,
            view_all_leads: include_non_assigned && user.can_view_non_assigned(),
        };
    }

    if user.is_super_admin() {
        return RequestScope {
            selected_agents: Vec::new(),
            include_non_assigned: false,
            view_all_leads: true,
        };
    }

    RequestScope {
        selected_agents: vec![user.id.clone()],
        include_non_assigned: false,
        view_all_leads: false,
    }
}
