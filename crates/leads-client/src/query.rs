//! Lead query composition.
//!
//! Turns the caller-facing filter state into the exact body
//! `POST /api/Lead/get` expects. Pure functions; no clock, no I/O.

use chrono::SecondsFormat;

use lw_domain::error::{Error, Result};

use crate::scope::resolve_scope;
use crate::types::{
    DateRange, FilterOptions, LeadsRequest, PaginationParams, ScopeOverrides, User,
};

/// Timestamp field the date range filters on when the caller does not say.
pub const DEFAULT_DATE_FOR: &str = "createdAt";
/// Search scope applied when the caller does not narrow the search box.
pub const DEFAULT_SEARCH_BOX_FILTER: &str = "leadInfo";

/// Build the `/api/Lead/get` body from identity, filter state, free-text
/// search and pagination.
///
/// Fails with [`Error::InvalidUser`] before any scope is resolved when the
/// user record carries no id; the backend would otherwise fall back to an
/// unscoped query.
pub fn compose_leads_request(
    user: &User,
    filters: &FilterOptions,
    search_text: &str,
    pagination: PaginationParams,
    overrides: &ScopeOverrides,
) -> Result<LeadsRequest> {
    if user.id.trim().is_empty() {
        return Err(Error::InvalidUser(
            "user id is required to query leads".into(),
        ));
    }

    let mut scope = resolve_scope(user, &filters.selected_agents);
    overrides.apply(&mut scope);

    Ok(LeadsRequest {
        search_term: search_text.trim().to_owned(),
        search_box_filters: filters
            .search_box_filters
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_SEARCH_BOX_FILTER.to_owned()]),
        selected_agents: scope.selected_agents,
        selected_statuses: filters.selected_statuses.clone(),
        selected_sources: filters.selected_sources.clone(),
        selected_tags: filters.selected_tags.clone(),
        date: date_list(&filters.date_range),
        date_for: filters
            .date_for
            .clone()
            .unwrap_or_else(|| DEFAULT_DATE_FOR.to_owned()),
        page: pagination.wire_page(),
        limit: pagination.limit.to_string(),
        userid: user.id.clone(),
        include_non_assigned: scope.include_non_assigned,
        view_all_leads: scope.view_all_leads,
    })
}

/// Non-null range ends in from→to order, rendered as ISO-8601 instants with
/// millisecond precision and a `Z` suffix. Empty when no date filter is set.
fn date_list(range: &DateRange) -> Vec<String> {
    [range.from, range.to]
        .into_iter()
        .flatten()
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Permissions;
    use chrono::{TimeZone, Utc};

    fn agent(id: &str) -> User {
        User {
            id: id.into(),
            role: "agent".into(),
            permissions: Permissions::default(),
        }
    }

    fn compose(user: &User, filters: &FilterOptions) -> LeadsRequest {
        compose_leads_request(
            user,
            filters,
            "",
            PaginationParams::new(0, 20),
            &ScopeOverrides::default(),
        )
        .unwrap()
    }

    #[test]
    fn defaults_fill_date_for_and_search_box() {
        let body = compose(&agent("u1"), &FilterOptions::default());
        assert_eq!(body.date_for, "createdAt");
        assert_eq!(body.search_box_filters, vec!["leadInfo".to_string()]);
        assert!(body.date.is_empty());
    }

    #[test]
    fn explicit_empty_search_box_is_sent_as_is() {
        let filters = FilterOptions {
            search_box_filters: Some(vec![]),
            ..FilterOptions::default()
        };
        let body = compose(&agent("u1"), &filters);
        assert!(body.search_box_filters.is_empty());
    }

    #[test]
    fn page_is_one_based_and_limit_is_a_string() {
        let body = compose_leads_request(
            &agent("u1"),
            &FilterOptions::default(),
            "",
            PaginationParams::new(4, 35),
            &ScopeOverrides::default(),
        )
        .unwrap();
        assert_eq!(body.page, 5);
        assert_eq!(body.limit, "35");
    }

    #[test]
    fn search_text_is_trimmed() {
        let body = compose_leads_request(
            &agent("u1"),
            &FilterOptions::default(),
            "  acme corp \n",
            PaginationParams::new(0, 20),
            &ScopeOverrides::default(),
        )
        .unwrap();
        assert_eq!(body.search_term, "acme corp");
    }

    #[test]
    fn date_range_renders_millisecond_instants() {
        let filters = FilterOptions {
            date_range: DateRange {
                from: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
                to: Some(Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap()),
            },
            ..FilterOptions::default()
        };
        let body = compose(&agent("u1"), &filters);
        assert_eq!(
            body.date,
            vec![
                "2024-03-01T00:00:00.000Z".to_string(),
                "2024-03-31T23:59:59.000Z".to_string(),
            ]
        );
    }

    #[test]
    fn open_ended_range_sends_one_instant() {
        let filters = FilterOptions {
            date_range: DateRange {
                from: None,
                to: Some(Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap()),
            },
            ..FilterOptions::default()
        };
        let body = compose(&agent("u1"), &filters);
        assert_eq!(body.date, vec!["2024-03-31T00:00:00.000Z".to_string()]);
    }

    #[test]
    fn userid_always_carries_the_caller() {
        let filters = FilterOptions {
            selected_agents: vec!["a7".into()],
            ..FilterOptions::default()
        };
        let body = compose(&agent("u1"), &filters);
        assert_eq!(body.userid, "u1");
        assert_eq!(body.selected_agents, vec!["a7".to_string()]);
    }

    #[test]
    fn blank_user_id_is_rejected_before_scoping() {
        let err = compose_leads_request(
            &agent("   "),
            &FilterOptions::default(),
            "",
            PaginationParams::new(0, 20),
            &ScopeOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidUser(_)));
    }

    #[test]
    fn overrides_replace_computed_scope_fields() {
        let overrides = ScopeOverrides {
            selected_agents: Some(vec![]),
            view_all_leads: Some(true),
            include_non_assigned: None,
        };
        let body = compose_leads_request(
            &agent("u1"),
            &FilterOptions::default(),
            "",
            PaginationParams::new(0, 20),
            &overrides,
        )
        .unwrap();
        // Self-scope computed ["u1"], override empties it.
        assert!(body.selected_agents.is_empty());
        assert!(body.view_all_leads);
        assert!(!body.include_non_assigned);
    }

    #[test]
    fn wire_body_uses_backend_key_spelling() {
        let filters = FilterOptions {
            date_range: DateRange {
                from: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
                to: None,
            },
            ..FilterOptions::default()
        };
        let body = compose(&agent("u1"), &filters);
        let value = serde_json::to_value(&body).unwrap();
        let obj = value.as_object().unwrap();

        for key in [
            "searchTerm",
            "searchBoxFilters",
            "selectedAgents",
            "selectedStatuses",
            "selectedSources",
            "selectedTags",
            "date",
            "dateFor",
            "page",
            "limit",
            "userid",
            "includeNonAssigned",
            "viewAllLeads",
        ] {
            assert!(obj.contains_key(key), "missing wire key {key}");
        }
        assert!(obj["limit"].is_string());
        assert!(obj["page"].is_u64());
    }
}
