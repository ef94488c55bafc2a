//! Normalization of backend option lists into picker-ready shapes.

use crate::types::{FilterOption, OptionRow, PaginationParams, TagPage, TagsResponse};

/// Map status/source rows onto picker options, keeping the backend order.
pub fn to_filter_options(rows: Vec<OptionRow>) -> Vec<FilterOption> {
    rows.into_iter()
        .map(|row| FilterOption {
            value: row.id,
            label: row.name,
            color: row.color,
        })
        .collect()
}

/// Normalize one page of tags.
///
/// Tag names are not unique across the result set, so each option gets a
/// synthetic `label::offset` value keyed to its absolute position. The
/// `has_more` flag compares returned rows against the requested limit: a
/// full final page claims one more page and the follow-up empty fetch
/// terminates the scroll. Callers depend on that shape, so it stays.
pub fn tag_page(resp: TagsResponse, pagination: PaginationParams) -> TagPage {
    let offset = pagination.offset();
    let returned = resp.data.len();

    let options = resp
        .data
        .into_iter()
        .enumerate()
        .map(|(i, row)| FilterOption {
            value: format!("{}::{}", row.name, offset + i),
            label: row.name,
            color: None,
        })
        .collect();

    TagPage {
        options,
        has_more: returned as u32 == pagination.limit,
        total_count: resp
            .total_tags
            .or(resp.total)
            .unwrap_or(returned as u64),
    }
}
