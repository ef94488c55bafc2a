//! End-to-end checks on the composed `/api/Lead/get` body: the exact JSON
//! the backend parses, produced from realistic filter state.

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use lw_leads::types::{
    DateRange, FilterOptions, PaginationParams, Permissions, ScopeOverrides, User,
    CAP_VIEW_NON_ASSIGNED, ROLE_SUPER_ADMIN,
};
use lw_leads::compose_leads_request;

fn user(id: &str, role: &str, caps: &[&str]) -> User {
    let mut permissions = Permissions::default();
    for cap in caps {
        permissions.lead.insert(cap.to_string());
    }
    User {
        id: id.into(),
        role: role.into(),
        permissions,
    }
}

fn to_json(
    user: &User,
    filters: &FilterOptions,
    search: &str,
    pagination: PaginationParams,
) -> Value {
    let body =
        compose_leads_request(user, filters, search, pagination, &ScopeOverrides::default())
            .unwrap();
    serde_json::to_value(&body).unwrap()
}

#[test]
fn plain_agent_first_page_body() {
    let body = to_json(
        &user("64a1", "agent", &[]),
        &FilterOptions::default(),
        "",
        PaginationParams::new(0, 20),
    );

    assert_eq!(
        body,
        json!({
            "searchTerm": "",
            "searchBoxFilters": ["leadInfo"],
            "selectedAgents": ["64a1"],
            "selectedStatuses": [],
            "selectedSources": [],
            "selectedTags": [],
            "date": [],
            "dateFor": "createdAt",
            "page": 1,
            "limit": "20",
            "userid": "64a1",
            "includeNonAssigned": false,
            "viewAllLeads": false,
        })
    );
}

#[test]
fn super_admin_defers_scope_to_the_backend() {
    let body = to_json(
        &user("adm", ROLE_SUPER_ADMIN, &[]),
        &FilterOptions::default(),
        "",
        PaginationParams::new(0, 20),
    );

    assert_eq!(body["selectedAgents"], json!([]));
    assert_eq!(body["viewAllLeads"], json!(true));
    assert_eq!(body["includeNonAssigned"], json!(false));
    assert_eq!(body["userid"], json!("adm"));
}

#[test]
fn full_filter_state_round_trips_to_the_wire() {
    let filters = FilterOptions {
        search_box_filters: Some(vec!["leadInfo".into(), "notes".into()]),
        selected_agents: vec!["a1".into(), "non-assigned".into()],
        selected_statuses: vec!["s-new".into()],
        selected_sources: vec!["src-web".into()],
        selected_tags: vec!["hot::0".into()],
        date_range: DateRange {
            from: Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2024, 5, 31, 18, 0, 0).unwrap()),
        },
        date_for: Some("updatedAt".into()),
    };

    let body = to_json(
        &user("u9", "agent", &[CAP_VIEW_NON_ASSIGNED]),
        &filters,
        "  Jane Smith ",
        PaginationParams::new(2, 50),
    );

    assert_eq!(
        body,
        json!({
            "searchTerm": "Jane Smith",
            "searchBoxFilters": ["leadInfo", "notes"],
            "selectedAgents": ["a1", "non-assigned"],
            "selectedStatuses": ["s-new"],
            "selectedSources": ["src-web"],
            "selectedTags": ["hot::0"],
            "date": ["2024-05-01T08:30:00.000Z", "2024-05-31T18:00:00.000Z"],
            "dateFor": "updatedAt",
            "page": 3,
            "limit": "50",
            "userid": "u9",
            "includeNonAssigned": true,
            "viewAllLeads": true,
        })
    );
}

#[test]
fn overrides_can_pin_an_audit_query() {
    let overrides = ScopeOverrides {
        selected_agents: Some(vec!["a3".into()]),
        include_non_assigned: Some(true),
        view_all_leads: Some(false),
    };
    let body = compose_leads_request(
        &user("adm", ROLE_SUPER_ADMIN, &[]),
        &FilterOptions::default(),
        "",
        PaginationParams::new(0, 10),
        &overrides,
    )
    .unwrap();
    let body = serde_json::to_value(&body).unwrap();

    assert_eq!(body["selectedAgents"], json!(["a3"]));
    assert_eq!(body["includeNonAssigned"], json!(true));
    assert_eq!(body["viewAllLeads"], json!(false));
}

#[test]
fn deep_pagination_keeps_string_limit() {
    let body = to_json(
        &user("u1", "agent", &[]),
        &FilterOptions::default(),
        "",
        PaginationParams::new(41, 100),
    );
    assert_eq!(body["page"], json!(42));
    assert_eq!(body["limit"], json!("100"));
}
